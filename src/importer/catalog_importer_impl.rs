// ==========================================
// 商城后台批量导入 - 目录导入器实现
// ==========================================
// 职责: 整合导入流程，从上传文件到目录存储
// 流程: 解析 → 表头校验 → 逐行校验 → 描述翻译 → 一次性批量写入
// 红线: 行级拒绝不中断导入；写入失败整批失败，不返回部分汇总
// ==========================================

use crate::config::{ImportConfigReader, TranslationSettings};
use crate::domain::{
    DomainType, ImportSummary, NormalizedRecord, RawRow, RejectionReason, RowRejection,
};
use crate::importer::catalog_importer_trait::{CatalogImporter, FileParser, SchemaValidator};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::read_csv_file;
use crate::repository::CatalogRepository;
use crate::translation::{
    build_provider_chain, TranslationGateway, TranslationOutcome, TranslationPolicy,
    TranslationProvider, TranslationState,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// 描述翻译统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct TranslationStats {
    translated: usize,
    untranslated: usize,
    skipped: usize,
}

// ==========================================
// CatalogImporterImpl - 目录导入器实现
// ==========================================
pub struct CatalogImporterImpl<R, C>
where
    R: CatalogRepository,
    C: ImportConfigReader,
{
    // 数据访问层
    catalog_repo: R,

    // 配置读取器
    config: C,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    schema_validator: Box<dyn SchemaValidator>,

    // 翻译服务链（None → 每次导入按配置构建）
    providers: Option<Vec<Arc<dyn TranslationProvider>>>,
}

impl<R, C> CatalogImporterImpl<R, C>
where
    R: CatalogRepository,
    C: ImportConfigReader,
{
    /// 创建新的 CatalogImporter 实例
    ///
    /// # 参数
    /// - catalog_repo: 目录仓储
    /// - config: 配置读取器
    /// - file_parser: 文件解析器
    /// - schema_validator: 字段校验器
    pub fn new(
        catalog_repo: R,
        config: C,
        file_parser: Box<dyn FileParser>,
        schema_validator: Box<dyn SchemaValidator>,
    ) -> Self {
        Self {
            catalog_repo,
            config,
            file_parser,
            schema_validator,
            providers: None,
        }
    }

    /// 使用指定的翻译服务链（替代配置中的服务链）
    pub fn with_providers(mut self, providers: Vec<Arc<dyn TranslationProvider>>) -> Self {
        self.providers = Some(providers);
        self
    }

    /// 目录仓储（只读访问）
    pub fn repository(&self) -> &R {
        &self.catalog_repo
    }

    /// 解析全部数据行（任何解析错误立即返回）
    fn parse_rows(&self, bytes: &[u8]) -> ImportResult<(Vec<String>, Vec<RawRow>)> {
        let table = self.file_parser.parse_bytes(bytes)?;
        let headers = table.headers;
        let rows = table.rows.collect::<ImportResult<Vec<_>>>()?;
        Ok((headers, rows))
    }

    /// 批次级表头校验
    fn check_header(&self, headers: &[String], domain: DomainType) -> ImportResult<()> {
        self.schema_validator
            .check_header(headers, domain)
            .map_err(|reason| match reason {
                RejectionReason::MissingFields { missing, optional } => {
                    ImportError::MissingFields { missing, optional }
                }
                other => ImportError::InternalError(other.to_string()),
            })
    }

    /// 逐行校验，拒绝行记录原因后继续
    fn validate_rows(
        &self,
        rows: &[RawRow],
        domain: DomainType,
    ) -> (Vec<NormalizedRecord>, Vec<RowRejection>) {
        let mut accepted = Vec::with_capacity(rows.len());
        let mut rejections = Vec::new();

        for row in rows {
            match self.schema_validator.validate_row(row, domain) {
                Ok(record) => accepted.push(record),
                Err(reason) => {
                    warn!(row_number = row.row_number, reason = %reason, "行校验未通过");
                    rejections.push(RowRejection {
                        row_number: row.row_number,
                        reason,
                    });
                }
            }
        }

        (accepted, rejections)
    }

    /// 依次翻译描述（不并发），返回最终记录
    async fn translate_descriptions(
        &self,
        records: Vec<NormalizedRecord>,
        settings: &TranslationSettings,
    ) -> (Vec<NormalizedRecord>, TranslationStats) {
        let mut stats = TranslationStats::default();

        if !settings.enabled {
            debug!("描述翻译已关闭");
            stats.skipped = records.len();
            return (records, stats);
        }

        let providers = match &self.providers {
            Some(providers) => providers.clone(),
            None => build_provider_chain(settings),
        };
        let gateway = TranslationGateway::new(providers, TranslationPolicy::from(settings));

        // 节流状态仅属于本次导入
        let mut state = TranslationState::new();
        let mut translated_records = Vec::with_capacity(records.len());

        for record in records {
            let outcome = gateway
                .translate_detailed(record.description(), &mut state)
                .await;
            match &outcome {
                TranslationOutcome::Translated { .. } => stats.translated += 1,
                TranslationOutcome::Untranslated(_) => stats.untranslated += 1,
                TranslationOutcome::Skipped(_) => stats.skipped += 1,
            }
            translated_records.push(record.with_description(outcome.into_text()));
        }

        (translated_records, stats)
    }
}

#[async_trait::async_trait]
impl<R, C> CatalogImporter for CatalogImporterImpl<R, C>
where
    R: CatalogRepository + Send + Sync,
    C: ImportConfigReader + Send + Sync,
{
    /// 从 CSV 字节流导入目录数据
    #[instrument(skip(self, bytes), fields(domain = %domain, bytes = bytes.len()))]
    async fn import_from_bytes(
        &self,
        bytes: &[u8],
        domain: DomainType,
    ) -> ImportResult<ImportSummary> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        info!(batch_id = %batch_id, domain = %domain, "开始导入目录数据");

        // === 步骤 1: 解析文件 ===
        debug!("步骤 1: 解析文件");
        let (headers, rows) = self.parse_rows(bytes).map_err(|e| {
            error!(error = %e, "文件解析失败");
            e
        })?;
        info!(total_rows = rows.len(), "文件解析完成");

        // === 步骤 2: 表头校验（先于任何行处理） ===
        debug!("步骤 2: 表头校验");
        self.check_header(&headers, domain).map_err(|e| {
            error!(error = %e, "表头校验失败");
            e
        })?;

        if rows.is_empty() {
            error!("文件中没有数据行");
            return Err(ImportError::NoDataRows);
        }

        // === 步骤 3: 逐行校验 ===
        debug!("步骤 3: 逐行校验");
        let attempted = rows.len();
        let (accepted, rejections) = self.validate_rows(&rows, domain);
        info!(
            accepted = accepted.len(),
            rejected = rejections.len(),
            "行校验完成"
        );

        // === 步骤 4: 描述翻译 ===
        debug!("步骤 4: 描述翻译");
        let settings = TranslationSettings::load(&self.config)
            .await
            .map_err(|e| ImportError::ConfigReadError(e.to_string()))?;
        let (records, stats) = self.translate_descriptions(accepted, &settings).await;
        info!(
            translated = stats.translated,
            untranslated = stats.untranslated,
            skipped = stats.skipped,
            "描述翻译完成"
        );

        // === 步骤 5: 一次性批量写入 ===
        debug!("步骤 5: 批量写入");
        let succeeded = if records.is_empty() {
            debug!("无可写入记录，跳过写入");
            0
        } else {
            self.catalog_repo
                .bulk_insert(domain, records)
                .await
                .map_err(|e| {
                    error!(error = %e, "目录写入失败");
                    ImportError::StoreWriteError(e.to_string())
                })?
        };

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            batch_id = %batch_id,
            attempted = attempted,
            succeeded = succeeded,
            rejected = rejections.len(),
            elapsed_ms = elapsed_ms,
            "目录数据导入完成"
        );

        Ok(ImportSummary {
            batch_id,
            domain,
            attempted,
            succeeded,
            rejected: rejections.len(),
            rejections,
            translated: stats.translated,
            untranslated: stats.untranslated,
            skipped_translation: stats.skipped,
            elapsed_ms,
        })
    }

    /// 从 CSV 文件导入目录数据
    async fn import_from_csv<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
        domain: DomainType,
    ) -> ImportResult<ImportSummary> {
        let path = file_path.as_ref();
        info!(file_path = %path.display(), "读取导入文件");
        let bytes = read_csv_file(path)?;
        self.import_from_bytes(&bytes, domain).await
    }
}
