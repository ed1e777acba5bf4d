//! Fixed-window admission control applied to every request.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::warn;

use userhub_core::clock::Clock;
use userhub_core::config::RateLimitConfig;
use userhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Process-wide fixed-window limiter.
///
/// Each window admits up to `capacity` requests. Once more than `window` has
/// elapsed since the window opened, the next request reopens it with the
/// full capacity. Unused capacity never carries over and nothing trickles
/// back mid-window.
#[derive(Debug)]
pub struct RateLimiter {
    capacity: u32,
    window: Duration,
    clock: Arc<dyn Clock>,
    state: Mutex<WindowState>,
}

#[derive(Debug)]
struct WindowState {
    remaining: u32,
    window_start: DateTime<Utc>,
}

impl RateLimiter {
    /// Creates a limiter whose first window opens now.
    pub fn new(capacity: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        let window_start = clock.now();
        Self {
            capacity,
            window,
            clock,
            state: Mutex::new(WindowState {
                remaining: capacity,
                window_start,
            }),
        }
    }

    /// Creates a limiter from configuration.
    pub fn from_config(config: &RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            config.requests_per_minute,
            Duration::from_secs(config.window_seconds),
            clock,
        )
    }

    /// Admits one request if the current window has capacity left.
    pub async fn try_acquire(&self) -> bool {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        // A clock that moved backwards yields a negative span; keep the window.
        let window_elapsed = (now - state.window_start)
            .to_std()
            .is_ok_and(|elapsed| elapsed > self.window);
        if window_elapsed {
            state.remaining = self.capacity;
            state.window_start = now;
        }

        if state.remaining > 0 {
            state.remaining -= 1;
            true
        } else {
            false
        }
    }
}

/// Rejects the request with `429` when the limiter is exhausted.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.rate_limiter.try_acquire().await {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Request rejected by rate limiter"
        );
        return Err(AppError::rate_limited("too many requests").into());
    }
    Ok(next.run(request).await)
}
