// ==========================================
// Lingva 服务
// ==========================================
// 接口: GET {endpoint}/api/v1/{src}/{tgt}/{text}
// 响应: {"translation": "..."}
// ==========================================

use crate::config::ProviderSettings;
use crate::translation::provider::{ProviderError, TranslationProvider, TranslationRequest};
use crate::translation::providers::{check_status, http_client};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

pub const NAME: &str = "lingva";
pub const DEFAULT_ENDPOINT: &str = "https://lingva.ml";

#[derive(Debug, Deserialize)]
struct LingvaResponse {
    translation: Option<String>,
    error: Option<String>,
}

pub struct LingvaProvider {
    http: Client,
    endpoint: String,
}

impl LingvaProvider {
    pub fn new(settings: &ProviderSettings, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            http: http_client(timeout)?,
            endpoint: settings
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        })
    }
}

/// 构建请求地址（文本作为单个路径段，自动百分号编码）
pub fn build_url(endpoint: &str, request: &TranslationRequest<'_>) -> Result<Url, ProviderError> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| ProviderError::Transport(format!("无效地址 {}: {}", endpoint, e)))?;
    url.path_segments_mut()
        .map_err(|_| ProviderError::Transport(format!("地址不支持路径: {}", endpoint)))?
        .pop_if_empty()
        .extend([
            "api",
            "v1",
            request.source_language,
            request.target_language,
            request.text,
        ]);
    Ok(url)
}

/// 解析响应体
pub fn parse_response(body: &str) -> Result<String, ProviderError> {
    let parsed: LingvaResponse = serde_json::from_str(body)?;
    if let Some(error) = parsed.error {
        return Err(ProviderError::Rejected(error));
    }
    parsed
        .translation
        .filter(|t| !t.trim().is_empty())
        .ok_or(ProviderError::EmptyResponse)
}

#[async_trait]
impl TranslationProvider for LingvaProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn translate(&self, request: &TranslationRequest<'_>) -> Result<String, ProviderError> {
        let url = build_url(&self.endpoint, request)?;
        let resp = self.http.get(url).send().await?;
        let body = check_status(resp)?.text().await?;
        parse_response(&body)
    }
}
