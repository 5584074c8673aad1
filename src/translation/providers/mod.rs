// ==========================================
// 商城后台批量导入 - 翻译服务实现
// ==========================================
// 服务: LibreTranslate / MyMemory / Lingva
// 约束: 每个服务持有独立的 reqwest::Client（含请求超时）
// ==========================================

pub mod libre;
pub mod lingva;
pub mod mymemory;

pub use libre::LibreTranslateProvider;
pub use lingva::LingvaProvider;
pub use mymemory::MyMemoryProvider;

use crate::config::{ProviderSettings, TranslationSettings};
use crate::translation::provider::{ProviderError, TranslationProvider};
use reqwest::{Client, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// 按配置顺序构建翻译服务链（未知服务或构建失败的服务跳过）
pub fn build_provider_chain(settings: &TranslationSettings) -> Vec<Arc<dyn TranslationProvider>> {
    let mut chain: Vec<Arc<dyn TranslationProvider>> = Vec::new();
    for provider in &settings.providers {
        match build_provider(provider, settings.request_timeout) {
            Ok(Some(p)) => chain.push(p),
            Ok(None) => warn!(provider = %provider.name, "未知翻译服务，已跳过"),
            Err(e) => warn!(provider = %provider.name, error = %e, "翻译服务初始化失败，已跳过"),
        }
    }
    chain
}

fn build_provider(
    settings: &ProviderSettings,
    timeout: Duration,
) -> Result<Option<Arc<dyn TranslationProvider>>, ProviderError> {
    let provider: Arc<dyn TranslationProvider> = match settings.name.as_str() {
        libre::NAME => Arc::new(LibreTranslateProvider::new(settings, timeout)?),
        mymemory::NAME => Arc::new(MyMemoryProvider::new(settings, timeout)?),
        lingva::NAME => Arc::new(LingvaProvider::new(settings, timeout)?),
        _ => return Ok(None),
    };
    Ok(Some(provider))
}

/// 构建带超时的 HTTP 客户端
pub(crate) fn http_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Transport(e.to_string()))
}

/// 统一状态码判断: 429 → 限流，非 2xx → 失败
pub(crate) fn check_status(resp: Response) -> Result<Response, ProviderError> {
    let status = resp.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited);
    }
    if !status.is_success() {
        return Err(ProviderError::Status(status.as_u16()));
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(names: &[&str]) -> TranslationSettings {
        TranslationSettings {
            enabled: true,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
            max_text_length: 5_000,
            request_timeout: Duration::from_secs(1),
            source_language: "en".to_string(),
            target_language: "es".to_string(),
            detect_target_language: true,
            providers: names
                .iter()
                .map(|n| ProviderSettings {
                    name: n.to_string(),
                    endpoint: None,
                    api_key: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_chain_keeps_order_and_skips_unknown() {
        let chain = build_provider_chain(&settings(&["lingva", "deepl", "libretranslate"]));
        let names: Vec<&str> = chain.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["lingva", "libretranslate"]);
    }
}
