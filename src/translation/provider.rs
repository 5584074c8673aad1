// ==========================================
// 商城后台批量导入 - 翻译服务 Trait
// ==========================================
// 职责: 统一各翻译服务的调用形态
// 红线: ProviderError 不出网关，只用于失败计数与日志
// ==========================================

use async_trait::async_trait;
use thiserror::Error;

/// 单次翻译请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationRequest<'a> {
    pub text: &'a str,
    pub source_language: &'a str,
    pub target_language: &'a str,
}

/// 翻译服务失败原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("HTTP 状态码非 2xx: {0}")]
    Status(u16),

    #[error("请求被限流")]
    RateLimited,

    #[error("请求超时")]
    Timeout,

    #[error("网络错误: {0}")]
    Transport(String),

    #[error("响应解析失败: {0}")]
    Decode(String),

    #[error("服务拒绝请求: {0}")]
    Rejected(String),

    #[error("译文为空")]
    EmptyResponse,

    #[error("译文与原文相同")]
    SameAsInput,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ProviderError::Status(status.as_u16())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Decode(err.to_string())
    }
}

// ==========================================
// TranslationProvider Trait
// ==========================================
// 实现者: LibreTranslateProvider, MyMemoryProvider, LingvaProvider
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// 服务标识（日志用）
    fn name(&self) -> &str;

    /// 翻译文本
    ///
    /// # 返回
    /// - Ok(String): 译文
    /// - Err(ProviderError): 由网关切换到下一个服务
    async fn translate(&self, request: &TranslationRequest<'_>) -> Result<String, ProviderError>;
}
