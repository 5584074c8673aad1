// ==========================================
// 商城后台批量导入 - 翻译节流状态
// ==========================================
// 职责: 记录上次请求时间与连续失败次数，计算退避间隔
// 生命周期: 每次导入新建，由导入器持有，不跨导入共享，不落库
// ==========================================

use std::time::Duration;
use tokio::time::Instant;

// ==========================================
// TranslationState
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationState {
    pub last_request_at: Option<Instant>, // None → 尚未请求过
    pub consecutive_failures: u32,
}

impl TranslationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所需请求间隔: min(base · 2^failures, max)
    ///
    /// # 参数
    /// - base: 基础间隔
    /// - max: 上限
    pub fn required_delay(&self, base: Duration, max: Duration) -> Duration {
        1u32.checked_shl(self.consecutive_failures)
            .and_then(|factor| base.checked_mul(factor))
            .map_or(max, |delay| delay.min(max))
    }

    /// 距离下一次请求还需等待的时长: max(0, required − (now − last))
    pub fn wait_duration(&self, now: Instant, base: Duration, max: Duration) -> Duration {
        match self.last_request_at {
            None => Duration::ZERO,
            Some(last) => self
                .required_delay(base, max)
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }

    /// 翻译成功: 失败计数清零
    pub fn record_success(&mut self, now: Instant) {
        self.consecutive_failures = 0;
        self.last_request_at = Some(now);
    }

    /// 所有服务均失败: 失败计数 +1
    pub fn record_failure(&mut self, now: Instant) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.last_request_at = Some(now);
    }
}
