// ==========================================
// 商城后台批量导入 - 导入结果模型
// ==========================================
// 职责: 行级拒绝原因（结构化） + 导入汇总
// 约束: 展示文案在 API 边界由 i18n 生成，核心层只保留结构化字段
// ==========================================

use crate::domain::types::DomainType;
use crate::i18n::t_with_args;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==========================================
// RejectionReason - 行被拒绝的原因
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionReason {
    /// 表头缺少必填列（批次级校验，整批失败）
    #[error("缺少必填字段: {}", .missing.join(", "))]
    MissingFields {
        missing: Vec<String>,
        optional: Vec<String>,
    },

    /// 枚举字段取值不在允许集合内（仅拒绝该行）
    #[error("字段 {field} 取值非法: \"{value}\"（合法取值: {}）", .allowed.join(", "))]
    InvalidEnumValue {
        field: String,
        value: String,
        allowed: Vec<String>,
    },
}

impl RejectionReason {
    /// 面向用户的本地化文案（使用当前 locale）
    pub fn message(&self) -> String {
        match self {
            RejectionReason::MissingFields { missing, optional } => {
                let optional = if optional.is_empty() {
                    crate::i18n::t("import.optional_none")
                } else {
                    optional.join(", ")
                };
                t_with_args(
                    "import.missing_fields",
                    &[("fields", &missing.join(", ")), ("optional", &optional)],
                )
            }
            RejectionReason::InvalidEnumValue {
                field,
                value,
                allowed,
            } => {
                let label = field_label(field);
                t_with_args(
                    "import.invalid_enum_value",
                    &[
                        ("field", &label),
                        ("value", value),
                        ("allowed", &allowed.join(", ")),
                    ],
                )
            }
        }
    }
}

/// 字段展示名（缺少翻译时回退为字段名本身）
fn field_label(field: &str) -> String {
    let key = format!("field.{}", field);
    let label = crate::i18n::t(&key);
    if label == key || label.ends_with(&key) {
        field.to_string()
    } else {
        label
    }
}

// ==========================================
// RowRejection - 被拒绝的行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRejection {
    pub row_number: usize,
    pub reason: RejectionReason,
}

// ==========================================
// ImportSummary - 单次导入汇总（只写一次）
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub batch_id: String,
    pub domain: DomainType,
    pub attempted: usize,
    pub succeeded: usize,
    pub rejected: usize,
    pub rejections: Vec<RowRejection>, // 按源文件行序

    // ===== 翻译统计 =====
    pub translated: usize,          // 成功翻译的描述数
    pub untranslated: usize,        // 所有服务失败、保留原文的描述数
    pub skipped_translation: usize, // 空描述/已是目标语言/翻译关闭

    pub elapsed_ms: u64,
}
