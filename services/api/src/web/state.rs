//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use crate::web::middleware::FixedWindowLimiter;
use jobba_core::ports::DatabaseService;
use std::sync::Arc;
use std::time::Duration;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseService>,
    pub config: Arc<Config>,
    /// `None` when rate limiting is switched off.
    pub rate_limiter: Option<Arc<FixedWindowLimiter>>,
}

impl AppState {
    pub fn new(db: Arc<dyn DatabaseService>, config: Arc<Config>) -> Self {
        let rate_limiter = (config.rate_limit_per_minute > 0).then(|| {
            Arc::new(FixedWindowLimiter::new(
                config.rate_limit_per_minute,
                Duration::from_secs(60),
            ))
        });
        Self {
            db,
            config,
            rate_limiter,
        }
    }
}
