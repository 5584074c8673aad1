// ==========================================
// 商城后台批量导入 - 配置层
// ==========================================
// 职责: 导入与翻译配置管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod import_config_trait;
pub mod translation_settings;

// 重导出核心配置管理器
pub use config_manager::{config_keys, defaults, ConfigManager};
pub use import_config_trait::ImportConfigReader;
pub use translation_settings::{ProviderSettings, TranslationSettings};
