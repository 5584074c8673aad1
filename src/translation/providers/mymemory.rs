// ==========================================
// MyMemory 服务
// ==========================================
// 接口: GET {endpoint}?q=..&langpair=src|tgt[&key=..]
// 响应: {"responseData": {"translatedText": "..."}, "responseStatus": 200}
// 注意: 超长文本返回 200 + "QUERY LENGTH LIMIT EXCEEDED"
// ==========================================

use crate::config::ProviderSettings;
use crate::translation::provider::{ProviderError, TranslationProvider, TranslationRequest};
use crate::translation::providers::{check_status, http_client};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const NAME: &str = "mymemory";
pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

const LENGTH_LIMIT_MARKER: &str = "QUERY LENGTH LIMIT EXCEEDED";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_data: Option<ResponseData>,
    response_status: Option<Value>, // 数字或字符串
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: Option<String>,
}

pub struct MyMemoryProvider {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl MyMemoryProvider {
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
    let parsed: MyMemoryResponse = serde_json::from_str(body)?;

    let status = parsed.response_status.as_ref().and_then(|v| match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    });
    if status == Some(429) {
        return Err(ProviderError::RateLimited);
    }

    let text = parsed
        .response_data
        .and_then(|d| d.translated_text)
        .filter(|t| !t.trim().is_empty())
        .ok_or(ProviderError::EmptyResponse)?;

    if text.to_uppercase().contains(LENGTH_LIMIT_MARKER) {
        return Err(ProviderError::Rejected(LENGTH_LIMIT_MARKER.to_string()));
    }
    if let Some(code) = status.filter(|c| !(200..300).contains(c)) {
        return Err(ProviderError::Status(code as u16));
    }
    Ok(text)
}

#[async_trait]
impl TranslationProvider for MyMemoryProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn translate(&self, request: &TranslationRequest<'_>) -> Result<String, ProviderError> {
        let langpair = format!("{}|{}", request.source_language, request.target_language);
        let mut query = vec![("q", request.text), ("langpair", langpair.as_str())];
        if let Some(key) = self.api_key.as_deref() {
            query.push(("key", key));
        }

        let resp = self.http.get(&self.endpoint).query(&query).send().await?;
        let body = check_status(resp)?.text().await?;
        parse_response(&body)
    }
}
