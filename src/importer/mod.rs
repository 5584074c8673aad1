// ==========================================
// 商城后台批量导入 - 导入层
// ==========================================
// 职责: CSV 上传 → 解析 → 校验 → 翻译 → 批量写入
// 支持: CSV
// ==========================================

// 模块声明
pub mod catalog_importer_impl;
pub mod catalog_importer_trait;
pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod schema;
pub mod schema_validator;
pub mod template;

// 重导出核心类型
pub use catalog_importer_impl::CatalogImporterImpl;
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ParsedTable, RawRowIter};
pub use schema::{DomainSchema, FieldRule, RuleKind};
pub use schema_validator::SchemaValidatorImpl;
pub use template::{generate_template, CsvTemplate};

// 重导出 Trait 接口
pub use catalog_importer_trait::{CatalogImporter, DataCleaner, FileParser, SchemaValidator};
