// ==========================================
// 商城后台批量导入 - 领域模型层
// ==========================================
// 职责: 定义目录实体、类型、导入结果
// 红线: 不含数据访问逻辑,不含网络调用
// ==========================================

pub mod catalog;
pub mod import;
pub mod types;

// 重导出核心类型
pub use catalog::{GameRecord, NormalizedRecord, ProductRecord, RawRow, ServiceRecord};
pub use import::{ImportSummary, RejectionReason, RowRejection};
pub use types::{Currency, DomainType, GameStatus, Platform, ProductCategory, PC_GAME_GENRES};
