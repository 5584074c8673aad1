// ==========================================
// LibreTranslate 服务
// ==========================================
// 接口: POST {endpoint} JSON {q, source, target, format, api_key?}
// 响应: {"translatedText": "..."}
// ==========================================

use crate::config::ProviderSettings;
use crate::translation::provider::{ProviderError, TranslationProvider, TranslationRequest};
use crate::translation::providers::{check_status, http_client};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const NAME: &str = "libretranslate";
pub const DEFAULT_ENDPOINT: &str = "https://libretranslate.de/translate";

#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

pub struct LibreTranslateProvider {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl LibreTranslateProvider {
    pub fn new(settings: &ProviderSettings, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            http: http_client(timeout)?,
            endpoint: settings
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key: settings.api_key.clone(),
        })
    }
}

/// 解析响应体
pub fn parse_response(body: &str) -> Result<String, ProviderError> {
    let parsed: LibreResponse = serde_json::from_str(body)?;
    if let Some(error) = parsed.error {
        return Err(ProviderError::Rejected(error));
    }
    parsed
        .translated_text
        .filter(|t| !t.trim().is_empty())
        .ok_or(ProviderError::EmptyResponse)
}

#[async_trait]
impl TranslationProvider for LibreTranslateProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn translate(&self, request: &TranslationRequest<'_>) -> Result<String, ProviderError> {
        let payload = LibreRequest {
            q: request.text,
            source: request.source_language,
            target: request.target_language,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let resp = self.http.post(&self.endpoint).json(&payload).send().await?;
        let body = check_status(resp)?.text().await?;
        parse_response(&body)
    }
}
