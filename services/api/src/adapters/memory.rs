//! services/api/src/adapters/memory.rs
//!
//! A process-local implementation of the `DatabaseService` port. It follows
//! the same list semantics as the SQLite adapter and backs the HTTP tests.

use async_trait::async_trait;
use jobba_core::domain::{Activity, JobApplication, NewActivity, NewApplication};
use jobba_core::ports::{DatabaseService, PortError, PortResult};
use jobba_core::query::{ApplicationQuery, Page};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    applications: BTreeMap<i64, JobApplication>,
    activities: BTreeMap<i64, Activity>,
    last_application_id: i64,
    last_activity_id: i64,
}

/// An in-memory store. Ids are never reused, like SQLite AUTOINCREMENT.
#[derive(Default)]
pub struct MemoryAdapter {
    tables: RwLock<Tables>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored activities across every application.
    pub async fn activity_count(&self) -> usize {
        self.tables.read().await.activities.len()
    }
}

fn application_not_found(id: i64) -> PortError {
    PortError::NotFound(format!("Application {} not found", id))
}

#[async_trait]
impl DatabaseService for MemoryAdapter {
    async fn list_applications(&self, query: &ApplicationQuery) -> PortResult<Page<JobApplication>> {
        let tables = self.tables.read().await;
        let mut matching: Vec<&JobApplication> = tables
            .applications
            .values()
            .filter(|application| query.matches(application))
            .collect();
        matching.sort_by(|a, b| query.sort_by.compare(a, b));

        let total = matching.len() as i64;
        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit()).unwrap_or(0);
        let results = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(Page {
            total,
            page: query.page,
            page_size: query.page_size,
            results,
        })
    }

    async fn get_application(&self, id: i64) -> PortResult<JobApplication> {
        self.tables
            .read()
            .await
            .applications
            .get(&id)
            .cloned()
            .ok_or_else(|| application_not_found(id))
    }

    async fn application_exists(&self, id: i64) -> PortResult<bool> {
        Ok(self.tables.read().await.applications.contains_key(&id))
    }

    async fn count_applications(&self) -> PortResult<i64> {
        Ok(self.tables.read().await.applications.len() as i64)
    }

    async fn create_application(&self, application: NewApplication) -> PortResult<JobApplication> {
        let mut tables = self.tables.write().await;
        tables.last_application_id += 1;
        let stored = application.with_id(tables.last_application_id);
        tables.applications.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_application(&self, application: &JobApplication) -> PortResult<()> {
        let mut tables = self.tables.write().await;
        match tables.applications.get_mut(&application.id) {
            Some(existing) => {
                *existing = application.clone();
                Ok(())
            }
            None => Err(application_not_found(application.id)),
        }
    }

    async fn delete_application(&self, id: i64) -> PortResult<()> {
        let mut tables = self.tables.write().await;
        if tables.applications.remove(&id).is_none() {
            return Err(application_not_found(id));
        }
        tables.activities.retain(|_, activity| activity.job_application_id != id);
        Ok(())
    }

    async fn list_activities(&self, application_id: i64) -> PortResult<Vec<Activity>> {
        let tables = self.tables.read().await;
        let mut activities: Vec<Activity> = tables
            .activities
            .values()
            .filter(|activity| activity.job_application_id == application_id)
            .cloned()
            .collect();
        activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(activities)
    }

    async fn create_activity(&self, activity: NewActivity) -> PortResult<Activity> {
        let mut tables = self.tables.write().await;
        if !tables.applications.contains_key(&activity.job_application_id) {
            return Err(application_not_found(activity.job_application_id));
        }
        tables.last_activity_id += 1;
        let stored = activity.with_id(tables.last_activity_id);
        tables.activities.insert(stored.id, stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jobba_core::domain::ApplicationStatus;
    use jobba_core::query::SortBy;

    fn new_application(company: &str) -> NewApplication {
        NewApplication {
            company: company.to_string(),
            role: "Dev".to_string(),
            source: None,
            status: ApplicationStatus::Draft,
            location: None,
            salary_range: None,
            applied_at: Utc::now(),
            next_action: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryAdapter::new();
        let first = store.create_application(new_application("Acme")).await.unwrap();
        store.delete_application(first.id).await.unwrap();
        let second = store.create_application(new_application("Bolt")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn offset_past_the_end_is_empty() {
        let store = MemoryAdapter::new();
        store.create_application(new_application("Acme")).await.unwrap();
        let query = ApplicationQuery::new(None, None, SortBy::Newest, Some(50), Some(10));
        let page = store.list_applications(&query).await.unwrap();
        assert_eq!(page.total, 1);
        assert!(page.results.is_empty());
    }
}
