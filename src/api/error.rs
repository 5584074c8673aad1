// ==========================================
// 商城后台批量导入 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，将导入/仓储错误转换为用户可读的消息
// 约束: 用户文案在此边界按当前语言生成
// ==========================================

use crate::domain::DomainType;
use crate::importer::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 将导入错误转换为 API 错误（附带本地化文案）
    ///
    /// # 参数
    /// - err: 导入错误
    /// - domain: 本次导入的目录类型
    pub fn from_import(err: ImportError, domain: DomainType) -> Self {
        let message = err.message(domain);
        match err {
            ImportError::FileNotFound(_) => ApiError::NotFound(message),
            ImportError::UnsupportedFormat(_) => ApiError::InvalidInput(message),
            ImportError::MissingFields { .. } | ImportError::NoDataRows => {
                ApiError::ValidationError(message)
            }
            ImportError::StoreWriteError(_) => ApiError::DatabaseError(message),
            ImportError::Other(e) => ApiError::Other(e),
            ImportError::InternalError(_) | ImportError::ConfigReadError(_) => {
                ApiError::InternalError(message)
            }
            ImportError::FileReadError(_) | ImportError::CsvParseError(_) => {
                ApiError::ImportError(message)
            }
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DatabaseConnectionError(msg) => {
                ApiError::DatabaseError(format!("数据库连接失败: {}", msg))
            }
            RepositoryError::LockError(msg) => {
                ApiError::InternalError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::Other(e) => ApiError::Other(e),
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
