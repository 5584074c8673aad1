// ==========================================
// 商城后台批量导入 - CSV 模板生成
// ==========================================
// 职责: 按目录类型生成表头 + 一行示例数据
// 列顺序: 与 DomainSchema::columns 一致
// ==========================================

use crate::domain::DomainType;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::schema::DomainSchema;
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};

/// 生成的 CSV 模板
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvTemplate {
    pub file_name: String, // {domain}_import_template.csv
    pub content: String,
}

/// 示例行（与列顺序一一对应）
fn example_row(domain: DomainType) -> &'static [&'static str] {
    match domain {
        DomainType::Game => &[
            "https://example.com/cover.jpg",
            "Game Name",
            "50 GB",
            "2024",
            "PC Game",
            "29.99",
            "USD",
            "Game description",
            "newly_added",
            "Action",
        ],
        DomainType::Product => &[
            "Product Name",
            "99.99",
            "USD",
            "Product description",
            "https://example.com/image.jpg",
            "electronics",
        ],
        DomainType::Service => &[
            "https://example.com/cover.jpg",
            "Service Name",
            "49.99",
            "USD",
            "Service description",
            "1 hour",
        ],
    }
}

/// 生成目录类型的导入模板
///
/// # 返回
/// - Ok(CsvTemplate): 文件名 + CSV 文本
pub fn generate_template(domain: DomainType) -> ImportResult<CsvTemplate> {
    let columns = DomainSchema::for_domain(domain).columns();

    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(&columns)?;
    writer.write_record(example_row(domain))?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::InternalError(format!("模板写入失败: {}", e)))?;
    let content = String::from_utf8(bytes)
        .map_err(|e| ImportError::InternalError(format!("模板编码失败: {}", e)))?;

    Ok(CsvTemplate {
        file_name: format!("{}_import_template.csv", domain.as_str()),
        content,
    })
}
