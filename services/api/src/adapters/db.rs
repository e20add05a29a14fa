//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the SQLite database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jobba_core::domain::{
    Activity, ApplicationStatus, JobApplication, NewActivity, NewApplication,
};
use jobba_core::ports::{DatabaseService, PortError, PortResult};
use jobba_core::query::{ApplicationQuery, Page, SortBy};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{FromRow, QueryBuilder, Sqlite};
use std::str::FromStr;

const APPLICATION_COLUMNS: &str = "id, company, role, source, status, location, salary_range, \
     applied_at, next_action, notes";

const ACTIVITY_COLUMNS: &str = "id, job_application_id, timestamp, type AS kind, details";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: SqlitePool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url`, creating the file if needed.
    /// Foreign keys are switched on for every connection so cascades fire.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

fn application_not_found(id: i64) -> PortError {
    PortError::NotFound(format!("Application {} not found", id))
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct ApplicationRecord {
    id: i64,
    company: String,
    role: String,
    source: Option<String>,
    status: i64,
    location: Option<String>,
    salary_range: Option<String>,
    applied_at: DateTime<Utc>,
    next_action: Option<String>,
    notes: Option<String>,
}
impl ApplicationRecord {
    fn to_domain(self) -> PortResult<JobApplication> {
        let status = ApplicationStatus::from_code(self.status).ok_or_else(|| {
            PortError::Unexpected(format!(
                "Application {} has unknown status code {}",
                self.id, self.status
            ))
        })?;
        Ok(JobApplication {
            id: self.id,
            company: self.company,
            role: self.role,
            source: self.source,
            status,
            location: self.location,
            salary_range: self.salary_range,
            applied_at: self.applied_at,
            next_action: self.next_action,
            notes: self.notes,
        })
    }
}

#[derive(FromRow)]
struct ActivityRecord {
    id: i64,
    job_application_id: i64,
    timestamp: DateTime<Utc>,
    kind: String,
    details: Option<String>,
}
impl ActivityRecord {
    fn to_domain(self) -> Activity {
        Activity {
            id: self.id,
            job_application_id: self.job_application_id,
            timestamp: self.timestamp,
            kind: self.kind,
            details: self.details,
        }
    }
}

//=========================================================================================
// List Query Translation
//=========================================================================================

fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, query: &ApplicationQuery) {
    builder.push(" WHERE 1 = 1");
    if let Some(status) = query.status {
        builder.push(" AND status = ").push_bind(status.code());
    }
    if let Some(company) = &query.company {
        // instr() is case-sensitive, unlike LIKE.
        builder
            .push(" AND instr(company, ")
            .push_bind(company.clone())
            .push(") > 0");
    }
}

fn order_clause(sort_by: SortBy) -> &'static str {
    match sort_by {
        SortBy::Company => " ORDER BY company ASC",
        SortBy::Role => " ORDER BY role ASC",
        SortBy::Date => " ORDER BY applied_at DESC",
        SortBy::Newest => " ORDER BY id DESC",
    }
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn list_applications(&self, query: &ApplicationQuery) -> PortResult<Page<JobApplication>> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM applications");
        push_filters(&mut count, query);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;

        let mut select = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM applications", APPLICATION_COLUMNS));
        push_filters(&mut select, query);
        select.push(order_clause(query.sort_by));
        select
            .push(" LIMIT ")
            .push_bind(query.limit())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let records = select
            .build_query_as::<ApplicationRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;

        let results = records
            .into_iter()
            .map(ApplicationRecord::to_domain)
            .collect::<PortResult<Vec<_>>>()?;

        Ok(Page {
            total,
            page: query.page,
            page_size: query.page_size,
            results,
        })
    }

    async fn get_application(&self, id: i64) -> PortResult<JobApplication> {
        let record = sqlx::query_as::<_, ApplicationRecord>(&format!(
            "SELECT {} FROM applications WHERE id = ?",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => application_not_found(id),
            _ => unexpected(e),
        })?;
        record.to_domain()
    }

    async fn application_exists(&self, id: i64) -> PortResult<bool> {
        let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(found > 0)
    }

    async fn count_applications(&self) -> PortResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications")
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)
    }

    async fn create_application(&self, application: NewApplication) -> PortResult<JobApplication> {
        let record = sqlx::query_as::<_, ApplicationRecord>(&format!(
            "INSERT INTO applications \
             (company, role, source, status, location, salary_range, applied_at, next_action, notes) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {}",
            APPLICATION_COLUMNS
        ))
        .bind(application.company)
        .bind(application.role)
        .bind(application.source)
        .bind(application.status.code())
        .bind(application.location)
        .bind(application.salary_range)
        .bind(application.applied_at)
        .bind(application.next_action)
        .bind(application.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;
        record.to_domain()
    }

    async fn update_application(&self, application: &JobApplication) -> PortResult<()> {
        let result = sqlx::query(
            "UPDATE applications SET company = ?, role = ?, source = ?, status = ?, location = ?, \
             salary_range = ?, applied_at = ?, next_action = ?, notes = ? WHERE id = ?",
        )
        .bind(&application.company)
        .bind(&application.role)
        .bind(&application.source)
        .bind(application.status.code())
        .bind(&application.location)
        .bind(&application.salary_range)
        .bind(application.applied_at)
        .bind(&application.next_action)
        .bind(&application.notes)
        .bind(application.id)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(application_not_found(application.id));
        }
        Ok(())
    }

    async fn delete_application(&self, id: i64) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM applications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(application_not_found(id));
        }
        Ok(())
    }

    async fn list_activities(&self, application_id: i64) -> PortResult<Vec<Activity>> {
        let records = sqlx::query_as::<_, ActivityRecord>(&format!(
            "SELECT {} FROM activities WHERE job_application_id = ? ORDER BY timestamp DESC, id DESC",
            ACTIVITY_COLUMNS
        ))
        .bind(application_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        let activities = records.into_iter().map(|r| r.to_domain()).collect();
        Ok(activities)
    }

    async fn create_activity(&self, activity: NewActivity) -> PortResult<Activity> {
        let application_id = activity.job_application_id;
        let record = sqlx::query_as::<_, ActivityRecord>(&format!(
            "INSERT INTO activities (job_application_id, timestamp, type, details) \
             VALUES (?, ?, ?, ?) RETURNING {}",
            ACTIVITY_COLUMNS
        ))
        .bind(activity.job_application_id)
        .bind(activity.timestamp)
        .bind(activity.kind)
        .bind(activity.details)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let orphaned = e
                .as_database_error()
                .map_or(false, |db_err| db_err.is_foreign_key_violation());
            if orphaned {
                application_not_found(application_id)
            } else {
                unexpected(e)
            }
        })?;
        Ok(record.to_domain())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    async fn adapter() -> DbAdapter {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        // A single connection that never idles out keeps the in-memory database alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .unwrap();
        let adapter = DbAdapter::new(pool);
        adapter.run_migrations().await.unwrap();
        adapter
    }

    fn new_application(company: &str, role: &str, day: u32) -> NewApplication {
        NewApplication {
            company: company.to_string(),
            role: role.to_string(),
            source: None,
            status: ApplicationStatus::Draft,
            location: None,
            salary_range: None,
            applied_at: Utc.with_ymd_and_hms(2025, 8, day, 9, 30, 0).unwrap(),
            next_action: None,
            notes: None,
        }
    }

    fn new_activity(application_id: i64, kind: &str, timestamp: DateTime<Utc>) -> NewActivity {
        NewActivity {
            job_application_id: application_id,
            timestamp,
            kind: kind.to_string(),
            details: None,
        }
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = adapter().await;
        db.run_migrations().await.unwrap();
        assert_eq!(db.count_applications().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let db = adapter().await;
        let mut input = new_application("Acme", "Engineer", 12);
        input.status = ApplicationStatus::Interview;
        input.salary_range = Some("80-100k CAD".to_string());

        let created = db.create_application(input.clone()).await.unwrap();
        let fetched = db.get_application(created.id).await.unwrap();

        assert_eq!(fetched, input.with_id(created.id));
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let db = adapter().await;
        assert!(matches!(db.get_application(42).await, Err(PortError::NotFound(_))));
        assert!(matches!(db.delete_application(42).await, Err(PortError::NotFound(_))));
        assert!(!db.application_exists(42).await.unwrap());

        let ghost = new_application("Ghost", "Nobody", 1).with_id(42);
        assert!(matches!(db.update_application(&ghost).await, Err(PortError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_replaces_columns() {
        let db = adapter().await;
        let mut stored = db.create_application(new_application("Acme", "Engineer", 1)).await.unwrap();
        stored.company = "Acme Corp".to_string();
        stored.status = ApplicationStatus::Offer;
        stored.notes = Some("Negotiate".to_string());

        db.update_application(&stored).await.unwrap();
        assert_eq!(db.get_application(stored.id).await.unwrap(), stored);
    }

    #[tokio::test]
    async fn delete_cascades_to_activities() {
        let db = adapter().await;
        let parent = db.create_application(new_application("Acme", "Engineer", 1)).await.unwrap();
        let other = db.create_application(new_application("Bolt", "Tester", 2)).await.unwrap();
        let now = Utc::now();
        for i in 0..3 {
            db.create_activity(new_activity(parent.id, "Note", now + Duration::minutes(i)))
                .await
                .unwrap();
        }
        db.create_activity(new_activity(other.id, "Note", now)).await.unwrap();

        db.delete_application(parent.id).await.unwrap();

        assert!(db.list_activities(parent.id).await.unwrap().is_empty());
        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activities WHERE job_application_id = ?")
            .bind(parent.id)
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(orphans, 0);
        assert_eq!(db.list_activities(other.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn activities_are_newest_first() {
        let db = adapter().await;
        let parent = db.create_application(new_application("Acme", "Engineer", 1)).await.unwrap();
        let base = Utc.with_ymd_and_hms(2025, 8, 20, 8, 0, 0).unwrap();
        db.create_activity(new_activity(parent.id, "Applied", base)).await.unwrap();
        db.create_activity(new_activity(parent.id, "FollowUp", base + Duration::days(2))).await.unwrap();
        db.create_activity(new_activity(parent.id, "StatusChange", base + Duration::days(1))).await.unwrap();

        let kinds: Vec<String> = db
            .list_activities(parent.id)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.kind)
            .collect();
        assert_eq!(kinds, vec!["FollowUp", "StatusChange", "Applied"]);
    }

    #[tokio::test]
    async fn activity_for_missing_parent_is_rejected() {
        let db = adapter().await;
        let result = db.create_activity(new_activity(99, "Note", Utc::now())).await;
        assert!(matches!(result, Err(PortError::NotFound(_))));
        assert!(db.list_activities(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_filters_sorts_and_paginates() {
        let db = adapter().await;
        for (company, day) in [("Delta", 4), ("Alpha", 2), ("Echo", 1), ("Bravo", 5), ("Charlie", 3)] {
            db.create_application(new_application(company, "Dev", day)).await.unwrap();
        }

        let by_company = ApplicationQuery::new(None, None, SortBy::Company, Some(2), Some(2));
        let page = db.list_applications(&by_company).await.unwrap();
        assert_eq!(page.total, 5);
        let companies: Vec<_> = page.results.iter().map(|a| a.company.as_str()).collect();
        assert_eq!(companies, vec!["Charlie", "Delta"]);

        let by_date = ApplicationQuery::new(None, None, SortBy::Date, None, None);
        let dates: Vec<_> = db
            .list_applications(&by_date)
            .await
            .unwrap()
            .results
            .iter()
            .map(|a| a.applied_at)
            .collect();
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));

        let newest = db.list_applications(&ApplicationQuery::default()).await.unwrap();
        let ids: Vec<_> = newest.results.iter().map(|a| a.id).collect();
        assert!(ids.windows(2).all(|w| w[0] > w[1]));
    }

    #[tokio::test]
    async fn company_filter_is_case_sensitive() {
        let db = adapter().await;
        db.create_application(new_application("Foundant", "Junior Dev", 1)).await.unwrap();
        db.create_application(new_application("PartnerStack", "Support", 2)).await.unwrap();

        let hit = ApplicationQuery::new(None, Some("ound".into()), SortBy::Newest, None, None);
        assert_eq!(db.list_applications(&hit).await.unwrap().total, 1);

        let miss = ApplicationQuery::new(None, Some("FOUND".into()), SortBy::Newest, None, None);
        assert_eq!(db.list_applications(&miss).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn status_filter_counts_before_pagination() {
        let db = adapter().await;
        for i in 0..4 {
            let mut input = new_application(&format!("Co {}", i), "Dev", 1);
            input.status = if i % 2 == 0 { ApplicationStatus::Applied } else { ApplicationStatus::Rejected };
            db.create_application(input).await.unwrap();
        }

        let query = ApplicationQuery::new(Some(ApplicationStatus::Applied), None, SortBy::Newest, Some(1), Some(1));
        let page = db.list_applications(&query).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].status, ApplicationStatus::Applied);
    }
}
