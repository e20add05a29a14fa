//! services/api/src/web/middleware.rs
//!
//! Fixed-window rate limiting for every route.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::warn;

use crate::web::state::AppState;

struct Window {
    started_at: Instant,
    used: u32,
}

/// Grants at most `permit_limit` requests per `window`. Requests over the
/// limit are rejected immediately rather than queued.
pub struct FixedWindowLimiter {
    permit_limit: u32,
    window: Duration,
    current: Mutex<Window>,
}

impl FixedWindowLimiter {
    pub fn new(permit_limit: u32, window: Duration) -> Self {
        Self {
            permit_limit,
            window,
            current: Mutex::new(Window {
                started_at: Instant::now(),
                used: 0,
            }),
        }
    }

    /// Takes one permit from the current window, starting a fresh window
    /// once the old one has elapsed.
    pub async fn try_acquire(&self) -> bool {
        let mut current = self.current.lock().await;
        let now = Instant::now();
        if now.duration_since(current.started_at) >= self.window {
            current.started_at = now;
            current.used = 0;
        }
        if current.used >= self.permit_limit {
            return false;
        }
        current.used += 1;
        true
    }
}

/// Middleware that rejects requests with 429 once the window is exhausted.
pub async fn rate_limit(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(limiter) = &state.rate_limiter {
        if !limiter.try_acquire().await {
            warn!(path = %req.uri().path(), "Rate limit exceeded");
            return Err(StatusCode::TOO_MANY_REQUESTS);
        }
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn permits_reset_when_window_elapses() {
        let limiter = FixedWindowLimiter::new(2, Duration::from_secs(60));

        assert!(limiter.try_acquire().await);
        assert!(limiter.try_acquire().await);
        assert!(!limiter.try_acquire().await);

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(!limiter.try_acquire().await);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(limiter.try_acquire().await);
    }
}
