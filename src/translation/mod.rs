// ==========================================
// 商城后台批量导入 - 翻译层
// ==========================================
// 职责: 描述字段的尽力翻译（多服务降级 + 节流退避）
// 红线: 翻译失败从不导致导入失败
// ==========================================

pub mod gateway;
pub mod language;
pub mod provider;
pub mod providers;
pub mod state;

pub use gateway::{truncate_for_wire, TranslationGateway, TranslationOutcome, TranslationPolicy};
pub use language::looks_like_language;
pub use provider::{ProviderError, TranslationProvider, TranslationRequest};
pub use providers::build_provider_chain;
pub use state::TranslationState;
