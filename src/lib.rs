// ==========================================
// 商城后台批量导入 - 核心库
// ==========================================
// 技术栈: Rust + SQLite + reqwest
// 系统定位: 管理员上传 CSV → 校验 → 描述翻译 → 目录批量写入
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 目录存储
pub mod repository;

// 导入层 - CSV 解析与校验
pub mod importer;

// 翻译层 - 外部翻译服务
pub mod translation;

// 配置层 - 导入/翻译配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Currency, DomainType, GameStatus, ImportSummary, NormalizedRecord, Platform,
    ProductCategory, RawRow, RejectionReason, RowRejection,
};

// 导入器
pub use importer::{CatalogImporter, CatalogImporterImpl, ImportError, ImportResult};

// 翻译
pub use translation::{TranslationGateway, TranslationProvider, TranslationState};

// API
pub use api::{ApiError, ImportApi, ImportApiResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "商城后台批量导入";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
