// ==========================================
// 商城后台批量导入 - 领域类型定义
// ==========================================
// 依据: 商品目录表结构（games / products / services）
// 序列化格式: 与目录存储中的取值保持一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 目录类型 (Domain Type)
// ==========================================
// 决定必填字段、可选字段以及校验规则表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainType {
    Game,    // 游戏
    Product, // 商品
    Service, // 服务
}

impl DomainType {
    pub const ALL: [DomainType; 3] = [DomainType::Game, DomainType::Product, DomainType::Service];

    /// 小写标识（game / product / service）
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainType::Game => "game",
            DomainType::Product => "product",
            DomainType::Service => "service",
        }
    }

    /// 目录存储中的表名
    pub fn table_name(&self) -> &'static str {
        match self {
            DomainType::Game => "games",
            DomainType::Product => "products",
            DomainType::Service => "services",
        }
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DomainType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "game" | "games" => Ok(DomainType::Game),
            "product" | "products" => Ok(DomainType::Product),
            "service" | "services" => Ok(DomainType::Service),
            other => Err(format!("未知目录类型: {}（可选: game, product, service）", other)),
        }
    }
}

// ==========================================
// 币种 (Currency)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "CUP")]
    Cup,
}

impl Currency {
    pub const ALLOWED: [&'static str; 2] = ["USD", "CUP"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Cup => "CUP",
        }
    }

    /// 精确匹配（区分大小写），非法取值返回 None
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "USD" => Some(Currency::Usd),
            "CUP" => Some(Currency::Cup),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 游戏平台 (Platform)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "PC Game")]
    PcGame,
    #[serde(rename = "PlayStation 4")]
    PlayStation4,
    #[serde(rename = "Nintendo Switch")]
    NintendoSwitch,
    #[serde(rename = "PlayStation 3")]
    PlayStation3,
    #[serde(rename = "Xbox 360")]
    Xbox360,
    #[serde(rename = "Xbox One")]
    XboxOne,
    #[serde(rename = "Xbox Series")]
    XboxSeries,
    #[serde(rename = "Nintendo WiiU")]
    NintendoWiiU,
    #[serde(rename = "Nintendo Wii")]
    NintendoWii,
    #[serde(rename = "Nintendo 3DS")]
    Nintendo3ds,
    #[serde(rename = "PlayStation 2")]
    PlayStation2,
    #[serde(rename = "PlayStation Portable")]
    PlayStationPortable,
    #[serde(rename = "PlayStation Vita")]
    PlayStationVita,
}

impl Platform {
    pub const ALLOWED: [&'static str; 13] = [
        "PC Game",
        "PlayStation 4",
        "Nintendo Switch",
        "PlayStation 3",
        "Xbox 360",
        "Xbox One",
        "Xbox Series",
        "Nintendo WiiU",
        "Nintendo Wii",
        "Nintendo 3DS",
        "PlayStation 2",
        "PlayStation Portable",
        "PlayStation Vita",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::PcGame => "PC Game",
            Platform::PlayStation4 => "PlayStation 4",
            Platform::NintendoSwitch => "Nintendo Switch",
            Platform::PlayStation3 => "PlayStation 3",
            Platform::Xbox360 => "Xbox 360",
            Platform::XboxOne => "Xbox One",
            Platform::XboxSeries => "Xbox Series",
            Platform::NintendoWiiU => "Nintendo WiiU",
            Platform::NintendoWii => "Nintendo Wii",
            Platform::Nintendo3ds => "Nintendo 3DS",
            Platform::PlayStation2 => "PlayStation 2",
            Platform::PlayStationPortable => "PlayStation Portable",
            Platform::PlayStationVita => "PlayStation Vita",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let platform = match value {
            "PC Game" => Platform::PcGame,
            "PlayStation 4" => Platform::PlayStation4,
            "Nintendo Switch" => Platform::NintendoSwitch,
            "PlayStation 3" => Platform::PlayStation3,
            "Xbox 360" => Platform::Xbox360,
            "Xbox One" => Platform::XboxOne,
            "Xbox Series" => Platform::XboxSeries,
            "Nintendo WiiU" => Platform::NintendoWiiU,
            "Nintendo Wii" => Platform::NintendoWii,
            "Nintendo 3DS" => Platform::Nintendo3ds,
            "PlayStation 2" => Platform::PlayStation2,
            "PlayStation Portable" => Platform::PlayStationPortable,
            "PlayStation Vita" => Platform::PlayStationVita,
            _ => return None,
        };
        Some(platform)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// PC 游戏类型 (Genre)
// ==========================================
// 仅 platform = "PC Game" 时有意义
pub const PC_GAME_GENRES: [&str; 20] = [
    "Action",
    "Action RPG",
    "Aventura Gráfica",
    "Aventura-Acción",
    "Beat Em-Up",
    "Conducción",
    "Estrategia",
    "Fighting",
    "Hack and Slash",
    "Metroidvania",
    "MMO",
    "Musou",
    "Plataformas",
    "Rogelike",
    "RPG",
    "Shooter",
    "Simulación",
    "Sports",
    "Survival",
    "Survival Horror",
];

// ==========================================
// 游戏上新状态 (Game Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    NewlyAdded, // 新上架
    Updated,    // 已更新
}

impl GameStatus {
    pub const ALLOWED: [&'static str; 2] = ["newly_added", "updated"];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::NewlyAdded => "newly_added",
            GameStatus::Updated => "updated",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "newly_added" => Some(GameStatus::NewlyAdded),
            "updated" => Some(GameStatus::Updated),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 商品类别 (Product Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Electronics, // 电子产品
    Accessory,   // 配件
}

impl ProductCategory {
    pub const ALLOWED: [&'static str; 2] = ["electronics", "accessory"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Electronics => "electronics",
            ProductCategory::Accessory => "accessory",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "electronics" => Some(ProductCategory::Electronics),
            "accessory" => Some(ProductCategory::Accessory),
            _ => None,
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_type_from_str() {
        assert_eq!("game".parse::<DomainType>().unwrap(), DomainType::Game);
        assert_eq!(" Products ".parse::<DomainType>().unwrap(), DomainType::Product);
        assert!("banner".parse::<DomainType>().is_err());
        assert_eq!(DomainType::Service.table_name(), "services");
    }

    #[test]
    fn test_enum_allowed_lists_round_trip() {
        for value in Platform::ALLOWED {
            assert_eq!(Platform::parse(value).map(|p| p.as_str()), Some(value));
        }
        for value in Currency::ALLOWED {
            assert_eq!(Currency::parse(value).map(|c| c.as_str()), Some(value));
        }
        assert!(Currency::parse("usd").is_none());
    }

    #[test]
    fn test_serde_uses_store_values() {
        let json = serde_json::to_string(&Platform::PcGame).unwrap();
        assert_eq!(json, "\"PC Game\"");
        let json = serde_json::to_string(&GameStatus::NewlyAdded).unwrap();
        assert_eq!(json, "\"newly_added\"");
    }
}
