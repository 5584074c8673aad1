// ==========================================
// 商城后台批量导入 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 此处仅包含致命错误；行级拒绝见 domain::RejectionReason
// ==========================================

use crate::domain::DomainType;
use crate::i18n::{t, t_with_args};
use crate::importer::schema::DomainSchema;
use crate::repository::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 批次级校验错误 =====
    #[error("缺少必填列: {}", .missing.join(", "))]
    MissingFields {
        missing: Vec<String>,
        optional: Vec<String>,
    },

    #[error("文件中没有数据行")]
    NoDataRows,

    // ===== 存储错误 =====
    #[error("目录写入失败: {0}")]
    StoreWriteError(String),

    // ===== 配置错误 =====
    #[error("配置读取失败: {0}")]
    ConfigReadError(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 面向用户的本地化文案（当前语言）
    ///
    /// # 参数
    /// - domain: 本次导入的目录类型（解析失败时提示其必填列）
    pub fn message(&self, domain: DomainType) -> String {
        match self {
            ImportError::FileNotFound(path) => {
                t_with_args("import.file_not_found", &[("path", path)])
            }
            ImportError::UnsupportedFormat(format) => {
                t_with_args("import.unsupported_format", &[("format", format)])
            }
            ImportError::CsvParseError(cause) => {
                let required = DomainSchema::for_domain(domain).required.join(", ");
                t_with_args(
                    "import.parse_error",
                    &[("cause", cause), ("required", &required)],
                )
            }
            ImportError::MissingFields { missing, optional } => {
                let optional = if optional.is_empty() {
                    t("import.optional_none")
                } else {
                    optional.join(", ")
                };
                t_with_args(
                    "import.missing_fields",
                    &[("fields", &missing.join(", ")), ("optional", &optional)],
                )
            }
            ImportError::NoDataRows => t("import.no_data_rows"),
            ImportError::StoreWriteError(detail) => {
                t_with_args("import.store_write_error", &[("detail", detail)])
            }
            other => other.to_string(),
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<RepositoryError>（写入失败整体视为致命）
impl From<RepositoryError> for ImportError {
    fn from(err: RepositoryError) -> Self {
        ImportError::StoreWriteError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
