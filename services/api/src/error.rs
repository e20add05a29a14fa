//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and how it is
//! rendered as an HTTP response.

use crate::config::ConfigError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use jobba_core::ports::PortError;
use jobba_core::validation::ValidationError;
use serde::Serialize;
use tracing::error;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Client input broke a validation rule; the message is returned as-is.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The referenced resource does not exist.
    #[error("Not found")]
    NotFound,

    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.0)
    }
}

/// An RFC 7807 problem body.
#[derive(Debug, Serialize)]
struct ProblemDetails {
    title: &'static str,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

fn problem(status: StatusCode, title: &'static str, detail: Option<String>) -> Response {
    let body = ProblemDetails {
        title,
        status: status.as_u16(),
        detail,
    };
    (
        status,
        [(header::CONTENT_TYPE, "application/problem+json")],
        Json(body),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(message) => {
                problem(StatusCode::BAD_REQUEST, "Validation failed", Some(message))
            }
            Self::NotFound | Self::Port(PortError::NotFound(_)) => {
                StatusCode::NOT_FOUND.into_response()
            }
            err => {
                error!(error = %err, "Error occurred in handler");
                problem(StatusCode::INTERNAL_SERVER_ERROR, "Unexpected error", None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let response = ApiError::from(ValidationError("Company is required.".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/problem+json"
        );
    }

    #[test]
    fn port_not_found_maps_to_404() {
        let response = ApiError::from(PortError::NotFound("Application 4".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn validation_body_carries_the_message() {
        let response = ApiError::from(ValidationError("Company is required.".into())).into_response();
        assert_eq!(
            body_json(response).await,
            json!({"title": "Validation failed", "status": 400, "detail": "Company is required."})
        );
    }

    #[tokio::test]
    async fn unexpected_faults_are_opaque_500s() {
        let response = ApiError::from(PortError::Unexpected("disk on fire".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/problem+json"
        );

        let body = body_json(response).await;
        assert_eq!(body, json!({"title": "Unexpected error", "status": 500}));
        assert!(!body.to_string().contains("disk on fire"));
    }
}
