//! services/api/src/web/mapping.rs
//!
//! Translation between the wire DTOs and the core domain types.
//! String fields are trimmed on write; `nextAction` and `notes` are stored verbatim.

use crate::web::dto::{
    ActivityResponse, ApplicationListItem, ApplicationListResponse, ApplicationResponse,
    CreateActivityRequest, CreateApplicationRequest, UpdateApplicationRequest,
};
use chrono::{DateTime, Utc};
use jobba_core::domain::{Activity, JobApplication, NewActivity, NewApplication};
use jobba_core::query::Page;
use jobba_core::validation::ApplicationFields;

fn trim_opt(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

impl CreateApplicationRequest {
    pub fn fields(&self) -> ApplicationFields<'_> {
        ApplicationFields {
            company: &self.company,
            role: &self.role,
            salary_range: self.salary_range.as_deref(),
        }
    }

    /// Builds the entity to insert; `appliedAt` falls back to `now`.
    pub fn into_new_application(self, now: DateTime<Utc>) -> NewApplication {
        NewApplication {
            company: self.company.trim().to_string(),
            role: self.role.trim().to_string(),
            source: trim_opt(self.source),
            status: self.status.into(),
            location: trim_opt(self.location),
            salary_range: trim_opt(self.salary_range),
            applied_at: self.applied_at.unwrap_or(now),
            next_action: self.next_action,
            notes: self.notes,
        }
    }
}

impl UpdateApplicationRequest {
    pub fn fields(&self) -> ApplicationFields<'_> {
        ApplicationFields {
            company: &self.company,
            role: &self.role,
            salary_range: self.salary_range.as_deref(),
        }
    }

    /// Overwrites every field of `entity`. An absent `appliedAt` keeps the stored value.
    pub fn apply_to(self, entity: &mut JobApplication) {
        entity.company = self.company.trim().to_string();
        entity.role = self.role.trim().to_string();
        entity.source = trim_opt(self.source);
        entity.status = self.status.into();
        entity.location = trim_opt(self.location);
        entity.salary_range = trim_opt(self.salary_range);
        if let Some(applied_at) = self.applied_at {
            entity.applied_at = applied_at;
        }
        entity.next_action = self.next_action;
        entity.notes = self.notes;
    }
}

impl CreateActivityRequest {
    /// The owner always comes from the request path.
    pub fn into_new_activity(self, application_id: i64, now: DateTime<Utc>) -> NewActivity {
        NewActivity {
            job_application_id: application_id,
            timestamp: now,
            kind: self.kind.trim().to_string(),
            details: self.details,
        }
    }
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id,
            job_application_id: activity.job_application_id,
            timestamp: activity.timestamp,
            kind: activity.kind,
            details: activity.details,
        }
    }
}

impl From<JobApplication> for ApplicationListItem {
    fn from(application: JobApplication) -> Self {
        Self {
            id: application.id,
            company: application.company,
            role: application.role,
            status: application.status.into(),
            applied_at: application.applied_at,
        }
    }
}

impl From<Page<JobApplication>> for ApplicationListResponse {
    fn from(page: Page<JobApplication>) -> Self {
        let page = page.map(ApplicationListItem::from);
        Self {
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            results: page.results,
        }
    }
}

impl ApplicationResponse {
    pub fn from_parts(application: JobApplication, activities: Vec<Activity>) -> Self {
        Self {
            id: application.id,
            company: application.company,
            role: application.role,
            source: application.source,
            status: application.status.into(),
            location: application.location,
            salary_range: application.salary_range,
            applied_at: application.applied_at,
            next_action: application.next_action,
            notes: application.notes,
            activities: activities.into_iter().map(ActivityResponse::from).collect(),
        }
    }
}
