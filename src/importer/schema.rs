// ==========================================
// 商城后台批量导入 - 目录字段规则表
// ==========================================
// 职责: 按目录类型声明必填列、可选列与字段规则
// 红线: 规则表只描述约束，不做取值转换
// ==========================================

use crate::domain::{DomainType, GameStatus, Platform, ProductCategory, PC_GAME_GENRES};

// ==========================================
// RuleKind - 字段规则类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// 自由文本（TRIM）
    FreeText,
    /// 原样透传（不 TRIM，不转换）
    Passthrough,
    /// 枚举取值；optional = true 时允许缺省
    Enumerated {
        allowed: &'static [&'static str],
        optional: bool,
    },
    /// 币种代码（USD / CUP）
    CurrencyCode,
    /// 数值；缺失/非法 → 0
    Numeric,
    /// 整数；缺失/非法 → 当前年份
    IntegerWithDefault,
    /// 条件枚举：仅当 when_field == equals 时校验，否则置空
    Conditional {
        when_field: &'static str,
        equals: &'static str,
        allowed: &'static [&'static str],
    },
}

// ==========================================
// FieldRule - 单个字段的规则
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub kind: RuleKind,
}

const fn rule(field: &'static str, kind: RuleKind) -> FieldRule {
    FieldRule { field, kind }
}

// ==========================================
// DomainSchema - 目录类型的列契约
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainSchema {
    pub domain: DomainType,
    pub required: &'static [&'static str], // 模板列顺序
    pub optional: &'static [&'static str], // 追加在必填列之后
    pub rules: &'static [FieldRule],
}

const GAME_RULES: [FieldRule; 10] = [
    rule("cover", RuleKind::FreeText),
    rule("name", RuleKind::FreeText),
    rule("size", RuleKind::FreeText),
    rule("year", RuleKind::IntegerWithDefault),
    rule(
        "platform",
        RuleKind::Enumerated {
            allowed: &Platform::ALLOWED,
            optional: false,
        },
    ),
    rule("price", RuleKind::Numeric),
    rule("currency", RuleKind::CurrencyCode),
    rule("description", RuleKind::Passthrough),
    rule(
        "status",
        RuleKind::Enumerated {
            allowed: &GameStatus::ALLOWED,
            optional: true,
        },
    ),
    rule(
        "genre",
        RuleKind::Conditional {
            when_field: "platform",
            equals: "PC Game",
            allowed: &PC_GAME_GENRES,
        },
    ),
];

const PRODUCT_RULES: [FieldRule; 6] = [
    rule("name", RuleKind::FreeText),
    rule("price", RuleKind::Numeric),
    rule("currency", RuleKind::CurrencyCode),
    rule("description", RuleKind::Passthrough),
    rule("image", RuleKind::FreeText),
    rule(
        "category",
        RuleKind::Enumerated {
            allowed: &ProductCategory::ALLOWED,
            optional: false,
        },
    ),
];

const SERVICE_RULES: [FieldRule; 6] = [
    rule("cover", RuleKind::FreeText),
    rule("name", RuleKind::FreeText),
    rule("price", RuleKind::Numeric),
    rule("currency", RuleKind::CurrencyCode),
    rule("description", RuleKind::Passthrough),
    rule("duration", RuleKind::FreeText),
];

const GAME_SCHEMA: DomainSchema = DomainSchema {
    domain: DomainType::Game,
    required: &[
        "cover",
        "name",
        "size",
        "year",
        "platform",
        "price",
        "currency",
        "description",
    ],
    optional: &["status", "genre"],
    rules: &GAME_RULES,
};

const PRODUCT_SCHEMA: DomainSchema = DomainSchema {
    domain: DomainType::Product,
    required: &["name", "price", "currency", "description", "image", "category"],
    optional: &[],
    rules: &PRODUCT_RULES,
};

const SERVICE_SCHEMA: DomainSchema = DomainSchema {
    domain: DomainType::Service,
    required: &["cover", "name", "price", "currency", "description", "duration"],
    optional: &[],
    rules: &SERVICE_RULES,
};

impl DomainSchema {
    /// 获取目录类型对应的列契约
    pub fn for_domain(domain: DomainType) -> &'static DomainSchema {
        match domain {
            DomainType::Game => &GAME_SCHEMA,
            DomainType::Product => &PRODUCT_SCHEMA,
            DomainType::Service => &SERVICE_SCHEMA,
        }
    }

    /// 模板列顺序（必填列 + 可选列）
    pub fn columns(&self) -> Vec<&'static str> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .copied()
            .collect()
    }

    /// 返回表头中缺失的必填列（保持契约顺序）
    pub fn missing_columns(&self, headers: &[String]) -> Vec<String> {
        self.required
            .iter()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .map(|col| col.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_required_column_has_a_rule() {
        for domain in DomainType::ALL {
            let schema = DomainSchema::for_domain(domain);
            for col in schema.columns() {
                assert!(
                    schema.rules.iter().any(|r| r.field == col),
                    "{} 缺少规则: {}",
                    domain,
                    col
                );
            }
        }
    }

    #[test]
    fn test_description_is_passthrough_everywhere() {
        for domain in DomainType::ALL {
            let schema = DomainSchema::for_domain(domain);
            let rule = schema.rules.iter().find(|r| r.field == "description").unwrap();
            assert_eq!(rule.kind, RuleKind::Passthrough);
        }
    }

    #[test]
    fn test_missing_columns_keeps_contract_order() {
        let schema = DomainSchema::for_domain(DomainType::Product);
        let headers = vec!["name".to_string(), "category".to_string(), "price".to_string()];
        assert_eq!(
            schema.missing_columns(&headers),
            vec!["currency", "description", "image"]
        );
    }

    #[test]
    fn test_game_columns_append_optional() {
        let cols = DomainSchema::for_domain(DomainType::Game).columns();
        assert_eq!(cols.len(), 10);
        assert_eq!(&cols[8..], &["status", "genre"]);
    }
}
