// ==========================================
// 商城后台批量导入 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、写入
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use crate::db::open_sqlite_connection;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        crate::db::init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at)
             VALUES ('global', ?1, ?2, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 从 config_kv 表读取配置值，带默认值（空白值视为未配置）
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(key)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    /// 读取数值配置，格式错误时回落默认值
    fn get_number_or_default<T>(&self, key: &str, default: T) -> Result<T, Box<dyn Error>>
    where
        T: std::str::FromStr + std::fmt::Display + Copy,
    {
        let value = self.get_config_or_default(key, &default.to_string())?;
        Ok(value.parse::<T>().unwrap_or_else(|_| {
            tracing::warn!(config_key = key, raw_value = %value, "配置格式错误，使用默认值");
            default
        }))
    }

    fn get_bool_or_default(&self, key: &str, default: bool) -> Result<bool, Box<dyn Error>> {
        let value = self.get_config_or_default(key, if default { "true" } else { "false" })?;
        match value.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Ok(default),
        }
    }
}

// ==========================================
// ImportConfigReader Trait 实现
// ==========================================
#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn is_translation_enabled(&self) -> Result<bool, Box<dyn Error>> {
        self.get_bool_or_default(config_keys::TRANSLATION_ENABLED, defaults::TRANSLATION_ENABLED)
    }

    async fn get_base_delay_ms(&self) -> Result<u64, Box<dyn Error>> {
        self.get_number_or_default(config_keys::BASE_DELAY_MS, defaults::BASE_DELAY_MS)
    }

    async fn get_max_delay_ms(&self) -> Result<u64, Box<dyn Error>> {
        self.get_number_or_default(config_keys::MAX_DELAY_MS, defaults::MAX_DELAY_MS)
    }

    async fn get_max_text_length(&self) -> Result<usize, Box<dyn Error>> {
        let value =
            self.get_number_or_default(config_keys::MAX_TEXT_LENGTH, defaults::MAX_TEXT_LENGTH)?;
        // 截断需保留 "..." 标记
        Ok(value.max(4))
    }

    async fn get_provider_timeout_secs(&self) -> Result<u64, Box<dyn Error>> {
        let value = self
            .get_number_or_default(config_keys::PROVIDER_TIMEOUT_SECS, defaults::PROVIDER_TIMEOUT_SECS)?;
        Ok(value.max(1))
    }

    async fn get_source_language(&self) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_or_default(config_keys::SOURCE_LANGUAGE, defaults::SOURCE_LANGUAGE)?
            .to_lowercase())
    }

    async fn get_target_language(&self) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_or_default(config_keys::TARGET_LANGUAGE, defaults::TARGET_LANGUAGE)?
            .to_lowercase())
    }

    async fn is_target_detection_enabled(&self) -> Result<bool, Box<dyn Error>> {
        self.get_bool_or_default(config_keys::DETECT_TARGET_LANGUAGE, defaults::DETECT_TARGET_LANGUAGE)
    }

    async fn get_provider_chain(&self) -> Result<Vec<String>, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::PROVIDER_CHAIN, defaults::PROVIDER_CHAIN)?;

        let chain: Vec<String> = value
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        if chain.is_empty() {
            Ok(defaults::PROVIDER_CHAIN.split(',').map(String::from).collect())
        } else {
            Ok(chain)
        }
    }

    async fn get_provider_endpoint(
        &self,
        provider: &str,
    ) -> Result<Option<String>, Box<dyn Error>> {
        let key = config_keys::provider_endpoint(provider);
        Ok(self
            .get_config_value(&key)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }

    async fn get_provider_api_key(
        &self,
        provider: &str,
    ) -> Result<Option<String>, Box<dyn Error>> {
        let key = config_keys::provider_api_key(provider);
        Ok(self
            .get_config_value(&key)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 翻译开关
    pub const TRANSLATION_ENABLED: &str = "translation_enabled";

    // 节流与退避
    pub const BASE_DELAY_MS: &str = "translation_base_delay_ms";
    pub const MAX_DELAY_MS: &str = "translation_max_delay_ms";
    pub const MAX_TEXT_LENGTH: &str = "translation_max_text_length";
    pub const PROVIDER_TIMEOUT_SECS: &str = "translation_timeout_secs";

    // 语言
    pub const SOURCE_LANGUAGE: &str = "translation_source_lang";
    pub const TARGET_LANGUAGE: &str = "translation_target_lang";
    pub const DETECT_TARGET_LANGUAGE: &str = "translation_detect_target";

    // 翻译服务链（逗号分隔，按优先级）
    pub const PROVIDER_CHAIN: &str = "translation_provider_chain";

    /// 服务地址: translation_endpoint/{provider}
    pub fn provider_endpoint(provider: &str) -> String {
        format!("translation_endpoint/{}", provider.trim().to_lowercase())
    }

    /// 服务密钥: translation_api_key/{provider}
    pub fn provider_api_key(provider: &str) -> String {
        format!("translation_api_key/{}", provider.trim().to_lowercase())
    }
}

// ==========================================
// 配置默认值
// ==========================================
pub mod defaults {
    pub const TRANSLATION_ENABLED: bool = true;
    pub const BASE_DELAY_MS: u64 = 5_000;
    pub const MAX_DELAY_MS: u64 = 15_000;
    pub const MAX_TEXT_LENGTH: usize = 5_000;
    pub const PROVIDER_TIMEOUT_SECS: u64 = 10;
    pub const SOURCE_LANGUAGE: &str = "en";
    pub const TARGET_LANGUAGE: &str = "es";
    pub const DETECT_TARGET_LANGUAGE: bool = true;
    pub const PROVIDER_CHAIN: &str = "libretranslate,mymemory,lingva";
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn manager() -> (NamedTempFile, ConfigManager) {
        let file = NamedTempFile::new().unwrap();
        let manager = ConfigManager::new(file.path().to_str().unwrap()).unwrap();
        (file, manager)
    }

    #[tokio::test]
    async fn test_defaults_when_table_is_empty() {
        let (_file, config) = manager();

        assert!(config.is_translation_enabled().await.unwrap());
        assert_eq!(config.get_base_delay_ms().await.unwrap(), 5_000);
        assert_eq!(config.get_max_delay_ms().await.unwrap(), 15_000);
        assert_eq!(config.get_max_text_length().await.unwrap(), 5_000);
        assert_eq!(config.get_provider_timeout_secs().await.unwrap(), 10);
        assert_eq!(config.get_source_language().await.unwrap(), "en");
        assert_eq!(config.get_target_language().await.unwrap(), "es");
        assert_eq!(
            config.get_provider_chain().await.unwrap(),
            vec!["libretranslate", "mymemory", "lingva"]
        );
        assert_eq!(config.get_provider_endpoint("lingva").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_overrides_and_malformed_values() {
        let (_file, config) = manager();
        config
            .set_global_config_value(config_keys::BASE_DELAY_MS, "250")
            .unwrap();
        config
            .set_global_config_value(config_keys::MAX_DELAY_MS, "not-a-number")
            .unwrap();
        config
            .set_global_config_value(config_keys::PROVIDER_CHAIN, " Lingva , ,mymemory")
            .unwrap();
        config
            .set_global_config_value(config_keys::TRANSLATION_ENABLED, "off")
            .unwrap();
        config
            .set_global_config_value(&config_keys::provider_api_key("LibreTranslate"), "k-123")
            .unwrap();

        assert_eq!(config.get_base_delay_ms().await.unwrap(), 250);
        assert_eq!(config.get_max_delay_ms().await.unwrap(), 15_000);
        assert_eq!(
            config.get_provider_chain().await.unwrap(),
            vec!["lingva", "mymemory"]
        );
        assert!(!config.is_translation_enabled().await.unwrap());
        assert_eq!(
            config.get_provider_api_key("libretranslate").await.unwrap(),
            Some("k-123".to_string())
        );
    }

    #[test]
    fn test_set_value_is_upsert() {
        let (_file, config) = manager();
        config.set_global_config_value("k", "1").unwrap();
        config.set_global_config_value("k", "2").unwrap();
        assert_eq!(
            config.get_global_config_value("k").unwrap(),
            Some("2".to_string())
        );
    }
}
