//! services/api/src/web/rest.rs
//!
//! The health endpoint and the master definition for the OpenAPI specification.

use crate::web::dto::{
    ActivityResponse, ApplicationListItem, ApplicationListResponse, ApplicationResponse,
    ApplicationStatusDto, CreateActivityRequest, CreateApplicationRequest, HealthResponse,
    UpdateApplicationRequest,
};
use crate::web::{activities, applications};
use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        applications::list_applications_handler,
        applications::get_application_handler,
        applications::create_application_handler,
        applications::update_application_handler,
        applications::delete_application_handler,
        activities::list_activities_handler,
        activities::create_activity_handler,
    ),
    components(
        schemas(
            ApplicationStatusDto,
            CreateApplicationRequest,
            UpdateApplicationRequest,
            ApplicationResponse,
            ApplicationListItem,
            ApplicationListResponse,
            CreateActivityRequest,
            ActivityResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "applications", description = "Job applications being tracked."),
        (name = "activities", description = "Time-stamped events recorded against an application."),
        (name = "health", description = "Liveness probe.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Health
//=========================================================================================

/// Liveness probe. Always succeeds while the process is serving.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
