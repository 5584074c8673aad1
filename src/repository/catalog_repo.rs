// ==========================================
// 商城后台批量导入 - 目录 Repository Trait
// ==========================================
// 职责: 定义导入所需的目录写入接口（不包含实现）
// 红线: Repository 不含业务规则，只做数据写入
// ==========================================

use crate::domain::{DomainType, NormalizedRecord};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// CatalogRepository Trait
// ==========================================
// 用途: 导入核心与目录存储之间的边界
// 实现者: CatalogRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// 批量插入目录记录（单次调用、整批成功或整批失败）
    ///
    /// # 参数
    /// - table: 目标目录类型（决定写入的表）
    /// - records: 已校验、已翻译的记录（保持源文件顺序）
    ///
    /// # 返回
    /// - Ok(usize): 写入的记录数
    /// - Err: 存储错误（整个事务回滚）
    async fn bulk_insert(
        &self,
        table: DomainType,
        records: Vec<NormalizedRecord>,
    ) -> RepositoryResult<usize>;
}
