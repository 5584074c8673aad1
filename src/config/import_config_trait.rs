// ==========================================
// 商城后台批量导入 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入流程所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use async_trait::async_trait;
use std::error::Error;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入流程（含翻译网关）所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    // ===== 翻译开关 =====

    /// 是否启用描述翻译
    ///
    /// # 默认值
    /// - true
    async fn is_translation_enabled(&self) -> Result<bool, Box<dyn Error>>;

    // ===== 节流与退避 =====

    /// 获取基础请求间隔（毫秒）
    ///
    /// # 默认值
    /// - 5000
    async fn get_base_delay_ms(&self) -> Result<u64, Box<dyn Error>>;

    /// 获取退避上限（毫秒）
    ///
    /// # 默认值
    /// - 15000
    ///
    /// # 用途
    /// - requiredDelay = min(base · 2^failures, max)
    async fn get_max_delay_ms(&self) -> Result<u64, Box<dyn Error>>;

    /// 获取单次请求文本最大字符数（超出则截断，仅影响请求）
    ///
    /// # 默认值
    /// - 5000
    async fn get_max_text_length(&self) -> Result<usize, Box<dyn Error>>;

    /// 获取单个翻译服务的请求超时（秒）
    ///
    /// # 默认值
    /// - 10
    async fn get_provider_timeout_secs(&self) -> Result<u64, Box<dyn Error>>;

    // ===== 语言 =====

    /// 获取源语言
    ///
    /// # 默认值
    /// - en
    async fn get_source_language(&self) -> Result<String, Box<dyn Error>>;

    /// 获取目标语言
    ///
    /// # 默认值
    /// - es
    async fn get_target_language(&self) -> Result<String, Box<dyn Error>>;

    /// 是否启用目标语言检测（已是目标语言的文本跳过翻译）
    ///
    /// # 默认值
    /// - true
    async fn is_target_detection_enabled(&self) -> Result<bool, Box<dyn Error>>;

    // ===== 翻译服务链 =====

    /// 获取翻译服务优先级列表
    ///
    /// # 返回
    /// - Vec<String>: 服务标识（小写，按优先级排列）
    ///
    /// # 默认值
    /// - ["libretranslate", "mymemory", "lingva"]
    async fn get_provider_chain(&self) -> Result<Vec<String>, Box<dyn Error>>;

    /// 获取翻译服务的自定义地址
    ///
    /// # 返回
    /// - None: 使用该服务的内置地址
    async fn get_provider_endpoint(&self, provider: &str)
        -> Result<Option<String>, Box<dyn Error>>;

    /// 获取翻译服务的 API Key
    ///
    /// # 返回
    /// - None: 匿名调用
    async fn get_provider_api_key(&self, provider: &str)
        -> Result<Option<String>, Box<dyn Error>>;
}
