// ==========================================
// 目录导入API
// ==========================================
// 职责: 封装目录批量导入与模板下载
// 约束: 拒绝原因在此处渲染为当前语言的文案
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::{DomainType, ImportSummary, RejectionReason};
use crate::i18n::t_with_args;
use crate::importer::{
    generate_template, CatalogImporter, CatalogImporterImpl, CsvParser, CsvTemplate,
    DataCleanerImpl, SchemaValidatorImpl,
};
use crate::repository::CatalogRepositoryImpl;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 被拒绝行（结构化原因 + 展示文案）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowRejectionView {
    pub row_number: usize,
    pub reason: RejectionReason,
    pub message: String,
}

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 导入批次ID
    pub batch_id: String,
    /// 目录类型
    pub domain: DomainType,
    /// 非空数据行数
    pub attempted: usize,
    /// 写入成功数
    pub succeeded: usize,
    /// 被拒绝行数
    pub rejected: usize,
    /// 被拒绝行明细（按源文件行序）
    pub rejections: Vec<RowRejectionView>,
    /// 描述翻译统计
    pub translated: usize,
    pub untranslated: usize,
    pub skipped_translation: usize,
    /// 导入耗时（毫秒）
    pub elapsed_ms: u64,
    /// 汇总文案
    pub message: String,
}

impl From<ImportSummary> for ImportApiResponse {
    fn from(summary: ImportSummary) -> Self {
        let message = t_with_args(
            "import.summary",
            &[
                ("succeeded", &summary.succeeded.to_string()),
                ("attempted", &summary.attempted.to_string()),
                ("rejected", &summary.rejected.to_string()),
            ],
        );
        let rejections = summary
            .rejections
            .into_iter()
            .map(|r| RowRejectionView {
                row_number: r.row_number,
                message: r.reason.message(),
                reason: r.reason,
            })
            .collect();

        Self {
            batch_id: summary.batch_id,
            domain: summary.domain,
            attempted: summary.attempted,
            succeeded: summary.succeeded,
            rejected: summary.rejected,
            rejections,
            translated: summary.translated,
            untranslated: summary.untranslated,
            skipped_translation: summary.skipped_translation,
            elapsed_ms: summary.elapsed_ms,
            message,
        }
    }
}

type DefaultImporter = CatalogImporterImpl<CatalogRepositoryImpl, ConfigManager>;

/// 导入API
pub struct ImportApi {
    db_path: String,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    pub fn new(db_path: String) -> Self {
        Self { db_path }
    }

    /// 导入目录数据（文件路径）
    ///
    /// # 参数
    /// - file_path: CSV 文件路径
    /// - domain: 目录类型（game / product / service）
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 导入结果
    /// - Err(ApiError): 错误信息（已本地化）
    #[instrument(skip(self))]
    pub async fn import_catalog(
        &self,
        file_path: &str,
        domain: &str,
    ) -> ApiResult<ImportApiResponse> {
        let domain = parse_domain(domain)?;
        let importer = self.create_importer()?;

        importer
            .import_from_csv(file_path, domain)
            .await
            .map(ImportApiResponse::from)
            .map_err(|e| ApiError::from_import(e, domain))
    }

    /// 导入目录数据（上传字节）
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    pub async fn import_catalog_bytes(
        &self,
        bytes: &[u8],
        domain: &str,
    ) -> ApiResult<ImportApiResponse> {
        let domain = parse_domain(domain)?;
        let importer = self.create_importer()?;

        importer
            .import_from_bytes(bytes, domain)
            .await
            .map(ImportApiResponse::from)
            .map_err(|e| ApiError::from_import(e, domain))
    }

    /// 生成导入模板
    pub fn generate_template(&self, domain: &str) -> ApiResult<CsvTemplate> {
        let domain = parse_domain(domain)?;
        generate_template(domain).map_err(|e| ApiError::from_import(e, domain))
    }

    /// 创建导入器
    fn create_importer(&self) -> ApiResult<DefaultImporter> {
        let repo = CatalogRepositoryImpl::new(&self.db_path)?;
        let config = ConfigManager::new(&self.db_path)
            .map_err(|e| ApiError::DatabaseError(format!("创建配置管理器失败: {}", e)))?;

        Ok(CatalogImporterImpl::new(
            repo,
            config,
            Box::new(CsvParser),
            Box::new(SchemaValidatorImpl::new(Box::new(DataCleanerImpl))),
        ))
    }
}

fn parse_domain(domain: &str) -> ApiResult<DomainType> {
    domain.parse::<DomainType>().map_err(ApiError::InvalidInput)
}
