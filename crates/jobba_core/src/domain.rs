//! crates/jobba_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Where an application currently stands. Callers may move freely between
/// any two states; there is no transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApplicationStatus {
    #[default]
    Draft,
    Applied,
    Screening,
    Interview,
    Offer,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    /// Every status, in declaration (and storage code) order.
    pub const ALL: [ApplicationStatus; 7] = [
        Self::Draft,
        Self::Applied,
        Self::Screening,
        Self::Interview,
        Self::Offer,
        Self::Rejected,
        Self::Withdrawn,
    ];

    /// The stable integer code persisted in the store.
    pub fn code(self) -> i64 {
        match self {
            Self::Draft => 0,
            Self::Applied => 1,
            Self::Screening => 2,
            Self::Interview => 3,
            Self::Offer => 4,
            Self::Rejected => 5,
            Self::Withdrawn => 6,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Applied => "Applied",
            Self::Screening => "Screening",
            Self::Interview => "Interview",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
            Self::Withdrawn => "Withdrawn",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a known application status")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    /// Accepts a variant name (any casing) or its numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Self::from_code(code).ok_or_else(|| UnknownStatus(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A persisted job application.
#[derive(Debug, Clone, PartialEq)]
pub struct JobApplication {
    pub id: i64,
    pub company: String,
    pub role: String,
    pub source: Option<String>,
    pub status: ApplicationStatus,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub next_action: Option<String>,
    pub notes: Option<String>,
}

/// An application that has not been stored yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub company: String,
    pub role: String,
    pub source: Option<String>,
    pub status: ApplicationStatus,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub next_action: Option<String>,
    pub notes: Option<String>,
}

impl NewApplication {
    /// Attaches a store-assigned id.
    pub fn with_id(self, id: i64) -> JobApplication {
        JobApplication {
            id,
            company: self.company,
            role: self.role,
            source: self.source,
            status: self.status,
            location: self.location,
            salary_range: self.salary_range,
            applied_at: self.applied_at,
            next_action: self.next_action,
            notes: self.notes,
        }
    }
}

/// A time-stamped event recorded against one application. Immutable once stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: i64,
    pub job_application_id: i64,
    pub timestamp: DateTime<Utc>,
    /// Free-form tag such as "Note", "StatusChange" or "FollowUp".
    pub kind: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub job_application_id: i64,
    pub timestamp: DateTime<Utc>,
    pub kind: String,
    pub details: Option<String>,
}

impl NewActivity {
    pub fn with_id(self, id: i64) -> Activity {
        Activity {
            id,
            job_application_id: self.job_application_id,
            timestamp: self.timestamp,
            kind: self.kind,
            details: self.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_declaration_order() {
        for (index, status) in ApplicationStatus::ALL.iter().enumerate() {
            assert_eq!(status.code(), index as i64);
            assert_eq!(ApplicationStatus::from_code(index as i64), Some(*status));
        }
        assert_eq!(ApplicationStatus::from_code(7), None);
        assert_eq!(ApplicationStatus::from_code(-1), None);
    }

    #[test]
    fn status_parses_names_and_codes() {
        assert_eq!("Screening".parse(), Ok(ApplicationStatus::Screening));
        assert_eq!("offer".parse(), Ok(ApplicationStatus::Offer));
        assert_eq!(" WITHDRAWN ".parse(), Ok(ApplicationStatus::Withdrawn));
        assert_eq!("1".parse(), Ok(ApplicationStatus::Applied));
        assert!("Ghosted".parse::<ApplicationStatus>().is_err());
        assert!("9".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn default_status_is_draft() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Draft);
    }
}
