//! Admission control configuration.

use serde::{Deserialize, Serialize};

/// Process-wide fixed-window rate limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests admitted per window.
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
    /// Window length in seconds.
    #[serde(default = "default_window")]
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: default_requests_per_minute(),
            window_seconds: default_window(),
        }
    }
}

fn default_requests_per_minute() -> u32 {
    5
}

fn default_window() -> u64 {
    60
}
