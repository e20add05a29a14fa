//! services/api/src/web/applications.rs
//!
//! Axum handlers for the `/applications` resource.

use crate::error::ApiError;
use crate::web::dto::{
    ApplicationListResponse, ApplicationResponse, CreateApplicationRequest,
    ListApplicationsParams, UpdateApplicationRequest,
};
use crate::web::extract::{IdPath, JsonBody};
use crate::web::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use chrono::Utc;
use jobba_core::domain::ApplicationStatus;
use jobba_core::query::{ApplicationQuery, SortBy};
use jobba_core::validation::validate_application;
use std::sync::Arc;
use tracing::info;

/// List applications with optional filtering, sorting and pagination.
#[utoipa::path(
    get,
    path = "/applications",
    params(ListApplicationsParams),
    responses(
        (status = 200, description = "One page of applications", body = ApplicationListResponse),
        (status = 400, description = "Unrecognized status filter"),
        (status = 500, description = "Internal server error")
    ),
    tag = "applications"
)]
pub async fn list_applications_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<ListApplicationsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let status = match params.status.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(
            raw.parse::<ApplicationStatus>()
                .map_err(|e| ApiError::Validation(e.to_string()))?,
        ),
        _ => None,
    };

    let query = ApplicationQuery::new(
        status,
        params.company,
        SortBy::from_key(params.sort_by.as_deref()),
        params.page,
        params.page_size,
    );
    let page = app_state.db.list_applications(&query).await?;

    Ok(Json(ApplicationListResponse::from(page)))
}

/// Fetch one application together with its activities.
#[utoipa::path(
    get,
    path = "/applications/{id}",
    params(("id" = i64, Path, description = "Application id")),
    responses(
        (status = 200, description = "The application", body = ApplicationResponse),
        (status = 404, description = "No application with this id")
    ),
    tag = "applications"
)]
pub async fn get_application_handler(
    State(app_state): State<Arc<AppState>>,
    IdPath(id): IdPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let application = app_state.db.get_application(id).await?;
    let activities = app_state.db.list_activities(id).await?;

    Ok(Json(ApplicationResponse::from_parts(application, activities)))
}

/// Create an application.
#[utoipa::path(
    post,
    path = "/applications",
    request_body = CreateApplicationRequest,
    responses(
        (status = 201, description = "Application created", body = ApplicationResponse,
            headers(("Location" = String, description = "URL of the new application"))),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "Internal server error")
    ),
    tag = "applications"
)]
pub async fn create_application_handler(
    State(app_state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<CreateApplicationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_application(request.fields())?;

    let created = app_state
        .db
        .create_application(request.into_new_application(Utc::now()))
        .await?;
    info!(id = created.id, company = %created.company, "Application created");

    let location = format!("/applications/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApplicationResponse::from_parts(created, Vec::new())),
    ))
}

/// Replace an application's fields.
#[utoipa::path(
    put,
    path = "/applications/{id}",
    params(("id" = i64, Path, description = "Application id")),
    request_body = UpdateApplicationRequest,
    responses(
        (status = 204, description = "Application updated"),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "No application with this id")
    ),
    tag = "applications"
)]
pub async fn update_application_handler(
    State(app_state): State<Arc<AppState>>,
    IdPath(id): IdPath<i64>,
    JsonBody(request): JsonBody<UpdateApplicationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_application(request.fields())?;

    let mut existing = app_state.db.get_application(id).await?;
    request.apply_to(&mut existing);
    app_state.db.update_application(&existing).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete an application and, with it, all of its activities.
#[utoipa::path(
    delete,
    path = "/applications/{id}",
    params(("id" = i64, Path, description = "Application id")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "No application with this id")
    ),
    tag = "applications"
)]
pub async fn delete_application_handler(
    State(app_state): State<Arc<AppState>>,
    IdPath(id): IdPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.db.delete_application(id).await?;
    info!(id, "Application deleted");

    Ok(StatusCode::NO_CONTENT)
}
