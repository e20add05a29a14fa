pub mod activities;
pub mod applications;
pub mod dto;
pub mod extract;
pub mod mapping;
pub mod middleware;
pub mod rest;
pub mod state;

use axum::{middleware as axum_middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use activities::{create_activity_handler, list_activities_handler};
pub use applications::{
    create_application_handler, delete_application_handler, get_application_handler,
    list_applications_handler, update_application_handler,
};
pub use middleware::rate_limit;
pub use rest::health_handler;
pub use state::AppState;

/// Builds the API router: every route, rate limited and request-logged.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/applications",
            get(list_applications_handler).post(create_application_handler),
        )
        .route(
            "/applications/{id}",
            get(get_application_handler)
                .put(update_application_handler)
                .delete(delete_application_handler),
        )
        .route(
            "/applications/{application_id}/activities",
            get(list_activities_handler).post(create_activity_handler),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            rate_limit,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
