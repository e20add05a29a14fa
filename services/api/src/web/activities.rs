//! services/api/src/web/activities.rs
//!
//! Axum handlers for the activities nested under an application.

use crate::error::ApiError;
use crate::web::dto::{ActivityResponse, CreateActivityRequest};
use crate::web::extract::{IdPath, JsonBody};
use crate::web::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use chrono::Utc;
use jobba_core::validation::validate_activity;
use std::sync::Arc;
use tracing::info;

/// List an application's activities, newest first.
#[utoipa::path(
    get,
    path = "/applications/{applicationId}/activities",
    params(("applicationId" = i64, Path, description = "Owning application id")),
    responses(
        (status = 200, description = "Activities, newest first", body = [ActivityResponse]),
        (status = 404, description = "No application with this id")
    ),
    tag = "activities"
)]
pub async fn list_activities_handler(
    State(app_state): State<Arc<AppState>>,
    IdPath(application_id): IdPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if !app_state.db.application_exists(application_id).await? {
        return Err(ApiError::NotFound);
    }

    let activities: Vec<ActivityResponse> = app_state
        .db
        .list_activities(application_id)
        .await?
        .into_iter()
        .map(ActivityResponse::from)
        .collect();

    Ok(Json(activities))
}

/// Record an activity against an application.
///
/// The owning application is always taken from the path; id and timestamp
/// are assigned by the server.
#[utoipa::path(
    post,
    path = "/applications/{applicationId}/activities",
    params(("applicationId" = i64, Path, description = "Owning application id")),
    request_body = CreateActivityRequest,
    responses(
        (status = 201, description = "Activity created", body = ActivityResponse,
            headers(("Location" = String, description = "URL of the new activity"))),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "No application with this id")
    ),
    tag = "activities"
)]
pub async fn create_activity_handler(
    State(app_state): State<Arc<AppState>>,
    IdPath(application_id): IdPath<i64>,
    JsonBody(request): JsonBody<CreateActivityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !app_state.db.application_exists(application_id).await? {
        return Err(ApiError::NotFound);
    }
    validate_activity(&request.kind, request.details.as_deref())?;

    let created = app_state
        .db
        .create_activity(request.into_new_activity(application_id, Utc::now()))
        .await?;
    info!(id = created.id, application_id, kind = %created.kind, "Activity recorded");

    let location = format!("/applications/{}/activities/{}", application_id, created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ActivityResponse::from(created)),
    ))
}
