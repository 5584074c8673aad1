// ==========================================
// 商城后台批量导入 - 文件解析器实现
// ==========================================
// 支持: CSV (.csv)，首行为表头
// 约束: 表头 TRIM；去除 UTF-8 BOM；整行空白的行静默丢弃
// ==========================================

use crate::domain::RawRow;
use crate::importer::catalog_importer_trait::FileParser;
use crate::importer::error::{ImportError, ImportResult};
use csv::{ReaderBuilder, StringRecordsIntoIter};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ==========================================
// ParsedTable - 表头 + 惰性行序列
// ==========================================
pub struct ParsedTable<'a> {
    pub headers: Vec<String>,
    pub rows: RawRowIter<'a>,
}

// ==========================================
// RawRowIter - 按源文件顺序惰性产出 RawRow
// ==========================================
// row_number: 数据行序号（从 1 开始，被丢弃的空白行也占序号）
pub struct RawRowIter<'a> {
    records: StringRecordsIntoIter<&'a [u8]>,
    headers: Vec<String>,
    ordinal: usize,
}

impl Iterator for RawRowIter<'_> {
    type Item = ImportResult<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(ImportError::from(e))),
            };
            self.ordinal += 1;

            // 多余列忽略，缺少的列不出现在映射中
            let fields: HashMap<String, String> = self
                .headers
                .iter()
                .zip(record.iter())
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, value)| (header.clone(), value.to_string()))
                .collect();

            let row = RawRow::new(self.ordinal, fields);
            if row.is_blank() {
                debug!(row_number = self.ordinal, "跳过空白行");
                continue;
            }
            return Some(Ok(row));
        }
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 读取 CSV 文件并解析为全部数据行
    ///
    /// # 参数
    /// - file_path: 文件路径（必须存在且扩展名为 .csv）
    ///
    /// # 返回
    /// - Ok((表头, 行列表))
    /// - Err: 文件不存在 / 格式不支持 / 解析失败
    pub fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<(Vec<String>, Vec<RawRow>)> {
        let bytes = read_csv_file(file_path)?;
        let table = self.parse_bytes(&bytes)?;
        let headers = table.headers;
        let rows = table.rows.collect::<ImportResult<Vec<_>>>()?;
        Ok((headers, rows))
    }
}

impl FileParser for CsvParser {
    fn parse_bytes<'a>(&self, bytes: &'a [u8]) -> ImportResult<ParsedTable<'a>> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        let mut records = reader.into_records();

        // 首条记录即表头
        let header_record = match records.next() {
            Some(record) => record?,
            None => {
                return Err(ImportError::CsvParseError(
                    "文件为空，无法确定表头".to_string(),
                ))
            }
        };

        let headers: Vec<String> = header_record
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::CsvParseError("表头为空".to_string()));
        }

        debug!(columns = headers.len(), "表头解析完成");

        Ok(ParsedTable {
            headers: headers.clone(),
            rows: RawRowIter {
                records,
                headers,
                ordinal: 0,
            },
        })
    }
}

/// 检查文件存在与扩展名后读取全部字节
pub fn read_csv_file(file_path: &Path) -> ImportResult<Vec<u8>> {
    // 检查文件存在
    if !file_path.exists() {
        return Err(ImportError::FileNotFound(file_path.display().to_string()));
    }

    // 检查扩展名
    let ext = file_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if ext != "csv" {
        return Err(ImportError::UnsupportedFormat(ext));
    }

    Ok(fs::read(file_path)?)
}
