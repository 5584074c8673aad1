// ==========================================
// 商城后台批量导入 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 数值默认化
// 红线: 数值非法从不拒绝行，只回落默认值
// ==========================================

use crate::importer::catalog_importer_trait::DataCleaner as DataCleanerTrait;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn coerce_price(&self, value: Option<&str>) -> f64 {
        self.normalize_null(value)
            .and_then(|v| leading_decimal(&v))
            .filter(|p| p.is_finite())
            .unwrap_or(0.0)
    }

    fn coerce_year(&self, value: Option<&str>, current_year: i32) -> i32 {
        self.normalize_null(value)
            .and_then(|v| leading_integer(&v))
            .filter(|year| *year > 0) // 0 / 负数视为非法
            .unwrap_or(current_year)
    }
}

/// 取字符串开头的十进制数（"29.99 USD" → 29.99）
fn leading_decimal(value: &str) -> Option<f64> {
    let bytes = value.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    value[..end].trim_end_matches('.').parse::<f64>().ok()
}

/// 取字符串开头的整数（"2024 edition" → 2024）
fn leading_integer(value: &str) -> Option<i32> {
    let bytes = value.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    value[..end].parse::<i32>().ok()
}
