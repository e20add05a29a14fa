//! crates/jobba_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete store behind it.

use async_trait::async_trait;
use crate::domain::{Activity, JobApplication, NewActivity, NewApplication};
use crate::query::{ApplicationQuery, Page};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The persistence contract for applications and their activities.
///
/// Each method is one logical unit of work against the store. Deleting an
/// application removes its activities atomically with it.
#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- Applications ---
    async fn list_applications(&self, query: &ApplicationQuery) -> PortResult<Page<JobApplication>>;

    /// Fails with `NotFound` when no row has this id.
    async fn get_application(&self, id: i64) -> PortResult<JobApplication>;

    async fn application_exists(&self, id: i64) -> PortResult<bool>;

    async fn count_applications(&self) -> PortResult<i64>;

    async fn create_application(&self, application: NewApplication) -> PortResult<JobApplication>;

    /// Replaces every mutable column of the row with `application.id`.
    async fn update_application(&self, application: &JobApplication) -> PortResult<()>;

    async fn delete_application(&self, id: i64) -> PortResult<()>;

    // --- Activities ---
    /// Activities for one application, newest timestamp first.
    async fn list_activities(&self, application_id: i64) -> PortResult<Vec<Activity>>;

    /// Fails with `NotFound` when the parent application is gone.
    async fn create_activity(&self, activity: NewActivity) -> PortResult<Activity>;
}
