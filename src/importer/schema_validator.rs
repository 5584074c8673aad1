// ==========================================
// 商城后台批量导入 - 目录字段校验器实现
// ==========================================
// 职责: 表头必填列校验 + 行级规则校验 + 默认值填充
// 顺序: 枚举校验 → 条件规则 → 文本/数值默认化（从不拒绝）
// 红线: description 原样透传，等待翻译
// ==========================================

use crate::domain::{
    Currency, DomainType, GameRecord, GameStatus, NormalizedRecord, Platform, ProductCategory,
    ProductRecord, RawRow, RejectionReason, ServiceRecord,
};
use crate::importer::catalog_importer_trait::{DataCleaner, SchemaValidator};
use crate::importer::schema::{DomainSchema, RuleKind};
use chrono::{Datelike, Local};
use std::collections::HashMap;

// ==========================================
// ResolvedRow - 按规则表解析后的一行
// ==========================================
#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    Text(String),
    Number(f64),
    Integer(i32),
    Choice(Option<String>), // 枚举/条件字段，None → 缺省或条件不满足
}

#[derive(Debug)]
struct ResolvedRow {
    values: HashMap<&'static str, FieldValue>,
    current_year: i32,
}

impl ResolvedRow {
    fn text(&self, field: &str) -> String {
        match self.values.get(field) {
            Some(FieldValue::Text(v)) | Some(FieldValue::Choice(Some(v))) => v.clone(),
            _ => String::new(),
        }
    }

    fn number(&self, field: &str) -> f64 {
        match self.values.get(field) {
            Some(FieldValue::Number(n)) => *n,
            _ => 0.0,
        }
    }

    fn integer(&self, field: &str) -> i32 {
        match self.values.get(field) {
            Some(FieldValue::Integer(n)) => *n,
            _ => self.current_year,
        }
    }

    fn choice(&self, field: &str) -> Option<&str> {
        match self.values.get(field) {
            Some(FieldValue::Choice(v)) => v.as_deref(),
            _ => None,
        }
    }
}

// ==========================================
// SchemaValidatorImpl
// ==========================================
pub struct SchemaValidatorImpl {
    data_cleaner: Box<dyn DataCleaner>,
}

impl SchemaValidatorImpl {
    pub fn new(data_cleaner: Box<dyn DataCleaner>) -> Self {
        Self { data_cleaner }
    }

    /// 按规则表解析一行（任一枚举/条件规则不满足即拒绝）
    fn resolve(&self, schema: &DomainSchema, row: &RawRow) -> Result<ResolvedRow, RejectionReason> {
        let mut resolved = ResolvedRow {
            values: HashMap::with_capacity(schema.rules.len()),
            current_year: Local::now().year(),
        };

        // === 第一遍: 枚举（含币种） ===
        for rule in schema.rules {
            let (allowed, optional) = match rule.kind {
                RuleKind::Enumerated { allowed, optional } => (allowed, optional),
                RuleKind::CurrencyCode => (&Currency::ALLOWED[..], false),
                _ => continue,
            };
            let value = row.get(rule.field);
            check_membership(rule.field, value, allowed, optional)?;
            resolved
                .values
                .insert(rule.field, FieldValue::Choice(value.map(str::to_string)));
        }

        // === 第二遍: 条件规则（不满足条件则置空） ===
        for rule in schema.rules {
            if let RuleKind::Conditional {
                when_field,
                equals,
                allowed,
            } = rule.kind
            {
                let value = if row.get(when_field) == Some(equals) {
                    check_membership(rule.field, row.get(rule.field), allowed, true)?;
                    row.get(rule.field).map(str::to_string)
                } else {
                    None
                };
                resolved.values.insert(rule.field, FieldValue::Choice(value));
            }
        }

        // === 第三遍: 文本与数值默认化 ===
        for rule in schema.rules {
            let value = match rule.kind {
                RuleKind::FreeText => FieldValue::Text(row.text(rule.field)),
                RuleKind::Passthrough => {
                    FieldValue::Text(row.raw(rule.field).unwrap_or_default().to_string())
                }
                RuleKind::Numeric => {
                    FieldValue::Number(self.data_cleaner.coerce_price(row.get(rule.field)))
                }
                RuleKind::IntegerWithDefault => FieldValue::Integer(
                    self.data_cleaner
                        .coerce_year(row.get(rule.field), resolved.current_year),
                ),
                _ => continue,
            };
            resolved.values.insert(rule.field, value);
        }

        Ok(resolved)
    }

    fn build_game(resolved: &ResolvedRow) -> Result<NormalizedRecord, RejectionReason> {
        Ok(NormalizedRecord::Game(GameRecord {
            cover: resolved.text("cover"),
            name: resolved.text("name"),
            size: resolved.text("size"),
            year: resolved.integer("year"),
            platform: typed(resolved, "platform", &Platform::ALLOWED, Platform::parse)?,
            price: resolved.number("price"),
            currency: typed(resolved, "currency", &Currency::ALLOWED, Currency::parse)?,
            description: resolved.text("description"),
            status: resolved.choice("status").and_then(GameStatus::parse),
            genre: resolved.choice("genre").map(str::to_string),
            views: 0,
        }))
    }

    fn build_product(resolved: &ResolvedRow) -> Result<NormalizedRecord, RejectionReason> {
        Ok(NormalizedRecord::Product(ProductRecord {
            name: resolved.text("name"),
            price: resolved.number("price"),
            currency: typed(resolved, "currency", &Currency::ALLOWED, Currency::parse)?,
            description: resolved.text("description"),
            image: resolved.text("image"),
            category: typed(
                resolved,
                "category",
                &ProductCategory::ALLOWED,
                ProductCategory::parse,
            )?,
        }))
    }

    fn build_service(resolved: &ResolvedRow) -> Result<NormalizedRecord, RejectionReason> {
        Ok(NormalizedRecord::Service(ServiceRecord {
            cover: resolved.text("cover"),
            name: resolved.text("name"),
            price: resolved.number("price"),
            currency: typed(resolved, "currency", &Currency::ALLOWED, Currency::parse)?,
            description: resolved.text("description"),
            duration: resolved.text("duration"),
        }))
    }
}

impl SchemaValidator for SchemaValidatorImpl {
    fn check_header(&self, headers: &[String], domain: DomainType) -> Result<(), RejectionReason> {
        let schema = DomainSchema::for_domain(domain);
        let missing = schema.missing_columns(headers);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RejectionReason::MissingFields {
                missing,
                optional: schema.optional.iter().map(|s| s.to_string()).collect(),
            })
        }
    }

    fn validate_row(
        &self,
        row: &RawRow,
        domain: DomainType,
    ) -> Result<NormalizedRecord, RejectionReason> {
        let schema = DomainSchema::for_domain(domain);
        let resolved = self.resolve(schema, row)?;

        match domain {
            DomainType::Game => Self::build_game(&resolved),
            DomainType::Product => Self::build_product(&resolved),
            DomainType::Service => Self::build_service(&resolved),
        }
    }
}

/// 精确匹配（区分大小写，取值已 TRIM）
fn check_membership(
    field: &str,
    value: Option<&str>,
    allowed: &[&str],
    optional: bool,
) -> Result<(), RejectionReason> {
    match value {
        None if optional => Ok(()),
        Some(v) if allowed.contains(&v) => Ok(()),
        other => Err(invalid_enum(field, other.unwrap_or_default(), allowed)),
    }
}

fn invalid_enum(field: &str, value: &str, allowed: &[&str]) -> RejectionReason {
    RejectionReason::InvalidEnumValue {
        field: field.to_string(),
        value: value.to_string(),
        allowed: allowed.iter().map(|s| s.to_string()).collect(),
    }
}

/// 将已通过枚举校验的取值转换为强类型
fn typed<T>(
    resolved: &ResolvedRow,
    field: &str,
    allowed: &[&str],
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, RejectionReason> {
    let value = resolved.choice(field).unwrap_or_default();
    parse(value).ok_or_else(|| invalid_enum(field, value, allowed))
}
