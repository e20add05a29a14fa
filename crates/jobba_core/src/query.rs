//! crates/jobba_core/src/query.rs
//!
//! The filtered, sorted and paginated read over job applications.
//!
//! Every store adapter receives an already-normalized `ApplicationQuery` and
//! must honour the same semantics: filters first, then exactly one sort
//! order, then `total` over the filtered rows, then offset/limit.

use crate::domain::{ApplicationStatus, JobApplication};
use std::cmp::Ordering;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// The single sort order applied to a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Company ascending.
    Company,
    /// Role ascending.
    Role,
    /// Applied-at descending.
    Date,
    /// Id descending, used for absent or unrecognized keys.
    #[default]
    Newest,
}

impl SortBy {
    /// Maps the external `sortBy` key. Matching is exact; anything else
    /// falls back to `Newest`.
    pub fn from_key(key: Option<&str>) -> Self {
        match key {
            Some("company") => Self::Company,
            Some("role") => Self::Role,
            Some("date") => Self::Date,
            _ => Self::Newest,
        }
    }

    /// Orders two applications the way a store must order them.
    /// String comparison is bytewise, matching SQLite's BINARY collation.
    pub fn compare(self, a: &JobApplication, b: &JobApplication) -> Ordering {
        match self {
            Self::Company => a.company.cmp(&b.company),
            Self::Role => a.role.cmp(&b.role),
            Self::Date => b.applied_at.cmp(&a.applied_at),
            Self::Newest => b.id.cmp(&a.id),
        }
    }
}

/// A normalized list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationQuery {
    pub status: Option<ApplicationStatus>,
    /// Case-sensitive substring filter on `company`.
    pub company: Option<String>,
    pub sort_by: SortBy,
    pub page: i64,
    pub page_size: i64,
}

impl Default for ApplicationQuery {
    fn default() -> Self {
        Self {
            status: None,
            company: None,
            sort_by: SortBy::Newest,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ApplicationQuery {
    /// Builds a query from raw inputs, clamping pagination to
    /// `page >= 1` and `1 <= page_size <= MAX_PAGE_SIZE`, and dropping a
    /// blank company filter.
    pub fn new(
        status: Option<ApplicationStatus>,
        company: Option<String>,
        sort_by: SortBy,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Self {
        let company = company.filter(|c| !c.trim().is_empty());
        Self {
            status,
            company,
            sort_by,
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Whether `application` passes the status and company filters.
    pub fn matches(&self, application: &JobApplication) -> bool {
        if let Some(status) = self.status {
            if application.status != status {
                return false;
            }
        }
        match &self.company {
            Some(company) => application.company.contains(company.as_str()),
            None => true,
        }
    }
}

/// One page of results plus the pre-pagination match count.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn application(id: i64, company: &str, role: &str, day: u32) -> JobApplication {
        JobApplication {
            id,
            company: company.to_string(),
            role: role.to_string(),
            source: None,
            status: ApplicationStatus::Draft,
            location: None,
            salary_range: None,
            applied_at: Utc.with_ymd_and_hms(2025, 8, day, 12, 0, 0).unwrap(),
            next_action: None,
            notes: None,
        }
    }

    #[test]
    fn sort_keys_are_exact() {
        assert_eq!(SortBy::from_key(Some("company")), SortBy::Company);
        assert_eq!(SortBy::from_key(Some("role")), SortBy::Role);
        assert_eq!(SortBy::from_key(Some("date")), SortBy::Date);
        assert_eq!(SortBy::from_key(Some("Company")), SortBy::Newest);
        assert_eq!(SortBy::from_key(Some("salary")), SortBy::Newest);
        assert_eq!(SortBy::from_key(None), SortBy::Newest);
    }

    #[test]
    fn comparisons_follow_sort_table() {
        let a = application(1, "Acme", "Tester", 3);
        let b = application(2, "Bolt", "Engineer", 5);

        assert_eq!(SortBy::Company.compare(&a, &b), Ordering::Less);
        assert_eq!(SortBy::Role.compare(&a, &b), Ordering::Greater);
        assert_eq!(SortBy::Date.compare(&a, &b), Ordering::Greater);
        assert_eq!(SortBy::Newest.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn pagination_defaults_and_offsets() {
        let query = ApplicationQuery::new(None, None, SortBy::Newest, None, None);
        assert_eq!((query.page, query.page_size), (1, 10));
        assert_eq!(query.offset(), 0);

        let query = ApplicationQuery::new(None, None, SortBy::Newest, Some(2), Some(2));
        assert_eq!(query.offset(), 2);
        assert_eq!(query.limit(), 2);
    }

    #[test]
    fn pagination_is_clamped() {
        let query = ApplicationQuery::new(None, None, SortBy::Newest, Some(0), Some(0));
        assert_eq!((query.page, query.page_size), (1, 1));

        let query = ApplicationQuery::new(None, None, SortBy::Newest, Some(-4), Some(5000));
        assert_eq!((query.page, query.page_size), (1, MAX_PAGE_SIZE));

        let query = ApplicationQuery::new(None, None, SortBy::Newest, Some(i64::MAX), Some(100));
        assert_eq!(query.offset(), i64::MAX);
    }

    #[test]
    fn filters_match_status_and_company_substring() {
        let mut foundant = application(1, "Foundant", "Junior Dev", 1);
        foundant.status = ApplicationStatus::Screening;

        let by_status = ApplicationQuery {
            status: Some(ApplicationStatus::Screening),
            ..ApplicationQuery::default()
        };
        assert!(by_status.matches(&foundant));
        assert!(!by_status.matches(&application(2, "Acme", "Dev", 1)));

        let by_company = ApplicationQuery::new(None, Some("ound".into()), SortBy::Newest, None, None);
        assert!(by_company.matches(&foundant));

        let case_mismatch = ApplicationQuery::new(None, Some("found".into()), SortBy::Newest, None, None);
        assert!(!case_mismatch.matches(&foundant));
    }

    #[test]
    fn blank_company_filter_is_dropped() {
        let query = ApplicationQuery::new(None, Some("   ".into()), SortBy::Newest, None, None);
        assert_eq!(query.company, None);
    }
}
