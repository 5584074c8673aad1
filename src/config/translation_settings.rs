// ==========================================
// 商城后台批量导入 - 翻译配置快照
// ==========================================
// 职责: 每次导入开始时读取一次翻译相关配置
// 红线: 快照在单次导入内不可变
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use std::error::Error;
use std::time::Duration;

/// 单个翻译服务的配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub name: String,             // 服务标识（libretranslate / mymemory / lingva）
    pub endpoint: Option<String>, // None → 内置地址
    pub api_key: Option<String>,
}

/// 翻译配置快照
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationSettings {
    pub enabled: bool,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub max_text_length: usize,
    pub request_timeout: Duration,
    pub source_language: String,
    pub target_language: String,
    pub detect_target_language: bool,
    pub providers: Vec<ProviderSettings>,
}

impl TranslationSettings {
    /// 从配置读取器加载快照
    ///
    /// # 参数
    /// - reader: 配置读取器
    ///
    /// # 返回
    /// - Ok(TranslationSettings)
    /// - Err: 配置存储不可读
    pub async fn load(reader: &dyn ImportConfigReader) -> Result<Self, Box<dyn Error>> {
        let enabled = reader.is_translation_enabled().await?;
        let base_delay_ms = reader.get_base_delay_ms().await?;
        let max_delay_ms = reader.get_max_delay_ms().await?;
        let max_text_length = reader.get_max_text_length().await?;
        let timeout_secs = reader.get_provider_timeout_secs().await?;
        let source_language = reader.get_source_language().await?;
        let target_language = reader.get_target_language().await?;
        let detect_target_language = reader.is_target_detection_enabled().await?;

        let chain = reader.get_provider_chain().await?;
        let mut providers = Vec::with_capacity(chain.len());
        for name in chain {
            let endpoint = reader.get_provider_endpoint(&name).await?;
            let api_key = reader.get_provider_api_key(&name).await?;
            providers.push(ProviderSettings {
                name,
                endpoint,
                api_key,
            });
        }

        Ok(Self {
            enabled,
            base_delay: Duration::from_millis(base_delay_ms),
            // 上限不低于基础间隔
            max_delay: Duration::from_millis(max_delay_ms.max(base_delay_ms)),
            max_text_length,
            request_timeout: Duration::from_secs(timeout_secs),
            source_language,
            target_language,
            detect_target_language,
            providers,
        })
    }
}
