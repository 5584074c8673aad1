// ==========================================
// 商城后台批量导入 - 目录领域模型
// ==========================================
// 依据: games / products / services 表结构
// 用途: 导入层写入,目录存储只读
// ==========================================

use crate::domain::types::{Currency, DomainType, GameStatus, Platform, ProductCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// RawRow - 解析器输出的原始行
// ==========================================
// 用途: 文件解析 → 校验器（仅在导入流程内存在）
// 约束: row_number 为源文件中的数据行序号（从 1 开始，含被丢弃的空行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub row_number: usize,
    pub fields: HashMap<String, String>,
}

impl RawRow {
    pub fn new(row_number: usize, fields: HashMap<String, String>) -> Self {
        Self { row_number, fields }
    }

    /// 读取字段值（TRIM 后为空视为缺失）
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// 读取原始字段值（不 TRIM）
    pub fn raw(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// 读取字段值，缺失时返回空串
    pub fn text(&self, column: &str) -> String {
        self.get(column).unwrap_or_default().to_string()
    }

    /// 整行是否全部为空白
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }
}

// ==========================================
// GameRecord - games 表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub cover: String,
    pub name: String,
    pub size: String,
    pub year: i32,                  // 缺失/非法 → 当前年份
    pub platform: Platform,
    pub price: f64,                 // 缺失/非法 → 0
    pub currency: Currency,
    pub description: String,
    pub status: Option<GameStatus>,
    pub genre: Option<String>,      // 仅 PC Game 保留
    pub views: i64,                 // 新导入固定为 0
}

// ==========================================
// ProductRecord - products 表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub price: f64,
    pub currency: Currency,
    pub description: String,
    pub image: String,
    pub category: ProductCategory,
}

// ==========================================
// ServiceRecord - services 表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub cover: String,
    pub name: String,
    pub price: f64,
    pub currency: Currency,
    pub description: String,
    pub duration: String,
}

// ==========================================
// NormalizedRecord - 校验/默认化/翻译后的落库记录
// ==========================================
// 生命周期: 由导入器创建,创建后不可变,仅被批量写入消费一次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NormalizedRecord {
    Game(GameRecord),
    Product(ProductRecord),
    Service(ServiceRecord),
}

impl NormalizedRecord {
    pub fn domain(&self) -> DomainType {
        match self {
            NormalizedRecord::Game(_) => DomainType::Game,
            NormalizedRecord::Product(_) => DomainType::Product,
            NormalizedRecord::Service(_) => DomainType::Service,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NormalizedRecord::Game(r) => &r.name,
            NormalizedRecord::Product(r) => &r.name,
            NormalizedRecord::Service(r) => &r.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            NormalizedRecord::Game(r) => &r.description,
            NormalizedRecord::Product(r) => &r.description,
            NormalizedRecord::Service(r) => &r.description,
        }
    }

    /// 以（可能已翻译的）描述替换原描述，生成最终记录
    pub fn with_description(self, description: String) -> Self {
        match self {
            NormalizedRecord::Game(r) => NormalizedRecord::Game(GameRecord { description, ..r }),
            NormalizedRecord::Product(r) => {
                NormalizedRecord::Product(ProductRecord { description, ..r })
            }
            NormalizedRecord::Service(r) => {
                NormalizedRecord::Service(ServiceRecord { description, ..r })
            }
        }
    }
}
