// ==========================================
// 商城后台批量导入 - 目录导入 Trait
// ==========================================
// 职责: 定义目录导入接口及其组件接口（不包含实现）
// ==========================================

use crate::domain::{DomainType, ImportSummary, NormalizedRecord, RawRow, RejectionReason};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::ParsedTable;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// CatalogImporter Trait
// ==========================================
// 用途: 目录批量导入主接口
// 实现者: CatalogImporterImpl
#[async_trait]
pub trait CatalogImporter: Send + Sync {
    /// 从 CSV 字节流导入目录数据
    ///
    /// # 参数
    /// - bytes: 上传文件的原始字节（首行为表头）
    /// - domain: 目标目录类型
    ///
    /// # 返回
    /// - Ok(ImportSummary): 导入汇总（含被拒绝行及原因）
    /// - Err: 解析失败 / 缺少必填列 / 无数据行 / 写入失败
    ///
    /// # 导入流程
    /// 1. 解析（解析错误直接返回）
    /// 2. 表头必填列校验（先于任何行处理）
    /// 3. 逐行校验，拒绝行记录原因后继续
    /// 4. 通过行的描述依次翻译（不并发）
    /// 5. 一次性批量写入
    async fn import_from_bytes(
        &self,
        bytes: &[u8],
        domain: DomainType,
    ) -> ImportResult<ImportSummary>;

    /// 从 CSV 文件导入目录数据
    ///
    /// # 参数
    /// - file_path: CSV 文件路径（.csv）
    /// - domain: 目标目录类型
    ///
    /// # 返回
    /// - Ok(ImportSummary): 导入汇总
    /// - Err: 文件不存在 / 格式不支持 / 同 import_from_bytes
    async fn import_from_csv<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
        domain: DomainType,
    ) -> ImportResult<ImportSummary>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 表格解析接口
// 实现者: CsvParser
pub trait FileParser: Send + Sync {
    /// 解析字节流为表头 + 惰性行序列
    ///
    /// # 返回
    /// - Ok(ParsedTable): 表头（已 TRIM）与行迭代器
    /// - Err: 无法确定表头
    fn parse_bytes<'a>(&self, bytes: &'a [u8]) -> ImportResult<ParsedTable<'a>>;
}

// ==========================================
// SchemaValidator Trait
// ==========================================
// 用途: 目录字段校验接口
// 实现者: SchemaValidatorImpl
pub trait SchemaValidator: Send + Sync {
    /// 批次级表头校验（每批仅执行一次）
    ///
    /// # 返回
    /// - Err(RejectionReason::MissingFields): 缺少必填列
    fn check_header(&self, headers: &[String], domain: DomainType) -> Result<(), RejectionReason>;

    /// 行级校验与默认值填充
    ///
    /// # 返回
    /// - Ok(NormalizedRecord): 除 description 外全部字段已规范化
    /// - Err(RejectionReason::InvalidEnumValue): 仅拒绝该行
    fn validate_row(
        &self,
        row: &RawRow,
        domain: DomainType,
    ) -> Result<NormalizedRecord, RejectionReason>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 取值清洗与数值默认化
// 实现者: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// 标准化 NULL 值（空字符串/空白 → None）
    fn normalize_null(&self, value: Option<&str>) -> Option<String>;

    /// 价格：解析数值前缀，缺失/非法 → 0
    fn coerce_price(&self, value: Option<&str>) -> f64;

    /// 年份：解析整数前缀，缺失/非法 → current_year
    fn coerce_year(&self, value: Option<&str>, current_year: i32) -> i32;
}
