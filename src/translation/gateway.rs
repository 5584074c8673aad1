// ==========================================
// 商城后台批量导入 - 翻译网关
// ==========================================
// 职责: 按优先级依次调用翻译服务，节流 + 失败退避
// 状态机: 空闲 → 节流等待 → 请求(服务 i) → {成功, 下一服务, 全部失败}
// 红线: translate 从不失败，最差情况返回原文
// ==========================================

use crate::config::TranslationSettings;
use crate::translation::language::looks_like_language;
use crate::translation::provider::{ProviderError, TranslationProvider, TranslationRequest};
use crate::translation::state::TranslationState;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

const ELLIPSIS: &str = "...";

// ==========================================
// TranslationPolicy - 网关使用的配置子集
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationPolicy {
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub max_text_length: usize,
    pub source_language: String,
    pub target_language: String,
    pub detect_target_language: bool,
}

impl From<&TranslationSettings> for TranslationPolicy {
    fn from(settings: &TranslationSettings) -> Self {
        Self {
            base_delay: settings.base_delay,
            max_delay: settings.max_delay,
            max_text_length: settings.max_text_length,
            source_language: settings.source_language.clone(),
            target_language: settings.target_language.clone(),
            detect_target_language: settings.detect_target_language,
        }
    }
}

// ==========================================
// TranslationOutcome - 单次翻译结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// 某个服务返回了有效译文
    Translated { text: String, provider: String },
    /// 未发起请求（空文本 / 已是目标语言 / 无可用服务），状态不变
    Skipped(String),
    /// 所有服务均失败，返回原文（未截断）
    Untranslated(String),
}

impl TranslationOutcome {
    pub fn into_text(self) -> String {
        match self {
            TranslationOutcome::Translated { text, .. } => text,
            TranslationOutcome::Skipped(text) => text,
            TranslationOutcome::Untranslated(text) => text,
        }
    }
}

/// 请求文本截断（按字符计数，超长时保留 max − 3 个字符并追加 "..."）
pub fn truncate_for_wire(text: &str, max_chars: usize) -> Cow<'_, str> {
    if text.chars().count() <= max_chars {
        return Cow::Borrowed(text);
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    Cow::Owned(truncated)
}

// ==========================================
// TranslationGateway
// ==========================================
pub struct TranslationGateway {
    providers: Vec<Arc<dyn TranslationProvider>>,
    policy: TranslationPolicy,
}

impl TranslationGateway {
    /// 创建翻译网关
    ///
    /// # 参数
    /// - providers: 按优先级排列的翻译服务
    /// - policy: 节流与语言配置
    pub fn new(providers: Vec<Arc<dyn TranslationProvider>>, policy: TranslationPolicy) -> Self {
        Self { providers, policy }
    }

    pub fn policy(&self) -> &TranslationPolicy {
        &self.policy
    }

    /// 翻译文本（失败时返回原文）
    pub async fn translate(&self, text: &str, state: &mut TranslationState) -> String {
        self.translate_detailed(text, state).await.into_text()
    }

    /// 翻译文本并返回结果类别
    ///
    /// # 参数
    /// - text: 原文
    /// - state: 本次导入的节流状态
    #[instrument(skip(self, text, state), fields(chars = text.chars().count()))]
    pub async fn translate_detailed(
        &self,
        text: &str,
        state: &mut TranslationState,
    ) -> TranslationOutcome {
        if text.trim().is_empty() {
            return TranslationOutcome::Skipped(text.to_string());
        }
        if self.policy.detect_target_language
            && looks_like_language(text, &self.policy.target_language)
        {
            debug!(target_language = %self.policy.target_language, "文本已是目标语言，跳过翻译");
            return TranslationOutcome::Skipped(text.to_string());
        }
        if self.providers.is_empty() {
            debug!("无可用翻译服务，跳过翻译");
            return TranslationOutcome::Skipped(text.to_string());
        }

        // === 节流等待 ===
        let wait = state.wait_duration(Instant::now(), self.policy.base_delay, self.policy.max_delay);
        if !wait.is_zero() {
            debug!(
                delay_ms = wait.as_millis() as u64,
                consecutive_failures = state.consecutive_failures,
                "翻译节流等待"
            );
            tokio::time::sleep(wait).await;
        }

        let wire_text = truncate_for_wire(text, self.policy.max_text_length);
        let request = TranslationRequest {
            text: &wire_text,
            source_language: &self.policy.source_language,
            target_language: &self.policy.target_language,
        };

        // === 依次尝试各服务 ===
        for provider in &self.providers {
            match self.try_provider(provider.as_ref(), &request).await {
                Ok(translated) => {
                    state.record_success(Instant::now());
                    debug!(provider = provider.name(), "翻译成功");
                    return TranslationOutcome::Translated {
                        text: translated,
                        provider: provider.name().to_string(),
                    };
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "翻译服务失败，尝试下一个");
                }
            }
        }

        state.record_failure(Instant::now());
        warn!(
            consecutive_failures = state.consecutive_failures,
            "所有翻译服务均失败，保留原文"
        );
        TranslationOutcome::Untranslated(text.to_string())
    }

    async fn try_provider(
        &self,
        provider: &dyn TranslationProvider,
        request: &TranslationRequest<'_>,
    ) -> Result<String, ProviderError> {
        let translated = provider.translate(request).await?;
        let translated = translated.trim();
        if translated.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        if translated == request.text.trim() {
            return Err(ProviderError::SameAsInput);
        }
        Ok(translated.to_string())
    }
}
