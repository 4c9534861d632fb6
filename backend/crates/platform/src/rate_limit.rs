//! Rate Limiting Infrastructure
//!
//! Counter-plus-timestamp limiter. A caller is blocked only while
//! `count >= max_requests` AND the last accepted submission is younger
//! than `window`. The counter is never reset: once the window has passed
//! one more request goes through, which refreshes the timestamp.

use std::time::Duration;

/// Rate limit configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Accepted submissions before the cooldown applies
    pub max_requests: u32,
    /// Cooldown measured from the last accepted submission
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 3,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn window_secs(&self) -> i64 {
        self.window.as_secs() as i64
    }
}

/// Per-client limiter state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateState {
    pub count: u32,
    /// Unix seconds of the last accepted submission (0 = never)
    pub last_submit_secs: i64,
}

impl RateState {
    /// Whether a request at `now_secs` must be rejected
    pub fn is_limited(&self, config: &RateLimitConfig, now_secs: i64) -> bool {
        now_secs - self.last_submit_secs < config.window_secs() && self.count >= config.max_requests
    }

    /// State after one more accepted submission at `now_secs`
    pub fn recorded(self, now_secs: i64) -> Self {
        Self {
            count: self.count.saturating_add(1),
            last_submit_secs: now_secs,
        }
    }

    /// Seconds until the cooldown ends; 0 when not limited
    pub fn retry_after_secs(&self, config: &RateLimitConfig, now_secs: i64) -> u64 {
        if !self.is_limited(config, now_secs) {
            return 0;
        }
        (self.last_submit_secs + config.window_secs() - now_secs).max(0) as u64
    }
}
