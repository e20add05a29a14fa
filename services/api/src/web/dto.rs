//! services/api/src/web/dto.rs
//!
//! The external JSON shapes of the API. Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use jobba_core::domain::ApplicationStatus;
use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

//=========================================================================================
// Shared Types
//=========================================================================================

/// Wire form of `ApplicationStatus`, serialized by variant name. Bodies may
/// send the name in any casing or the numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
pub enum ApplicationStatusDto {
    #[default]
    Draft,
    Applied,
    Screening,
    Interview,
    Offer,
    Rejected,
    Withdrawn,
}

impl From<ApplicationStatusDto> for ApplicationStatus {
    fn from(status: ApplicationStatusDto) -> Self {
        match status {
            ApplicationStatusDto::Draft => Self::Draft,
            ApplicationStatusDto::Applied => Self::Applied,
            ApplicationStatusDto::Screening => Self::Screening,
            ApplicationStatusDto::Interview => Self::Interview,
            ApplicationStatusDto::Offer => Self::Offer,
            ApplicationStatusDto::Rejected => Self::Rejected,
            ApplicationStatusDto::Withdrawn => Self::Withdrawn,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StatusWire {
    Code(i64),
    Name(String),
}

impl<'de> Deserialize<'de> for ApplicationStatusDto {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let status = match StatusWire::deserialize(deserializer)? {
            StatusWire::Code(code) => ApplicationStatus::from_code(code).ok_or_else(|| {
                de::Error::custom(format!("'{code}' is not a known application status"))
            })?,
            StatusWire::Name(name) => name.parse::<ApplicationStatus>().map_err(de::Error::custom)?,
        };
        Ok(status.into())
    }
}

/// `null` reads as an empty string, which validation then reports as missing.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<ApplicationStatus> for ApplicationStatusDto {
    fn from(status: ApplicationStatus) -> Self {
        match status {
            ApplicationStatus::Draft => Self::Draft,
            ApplicationStatus::Applied => Self::Applied,
            ApplicationStatus::Screening => Self::Screening,
            ApplicationStatus::Interview => Self::Interview,
            ApplicationStatus::Offer => Self::Offer,
            ApplicationStatus::Rejected => Self::Rejected,
            ApplicationStatus::Withdrawn => Self::Withdrawn,
        }
    }
}

//=========================================================================================
// Application Payloads
//=========================================================================================

/// Body of `POST /applications`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub role: String,
    pub source: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatusDto,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    /// Defaults to the time of creation.
    pub applied_at: Option<DateTime<Utc>>,
    pub next_action: Option<String>,
    pub notes: Option<String>,
}

/// Body of `PUT /applications/{id}`. A full replacement, not a patch:
/// absent optional fields are cleared, except `appliedAt` which is kept.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub role: String,
    pub source: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatusDto,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub applied_at: Option<DateTime<Utc>>,
    pub next_action: Option<String>,
    pub notes: Option<String>,
}

/// The full application, as returned by fetch and create.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: i64,
    pub company: String,
    pub role: String,
    pub source: Option<String>,
    pub status: ApplicationStatusDto,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub next_action: Option<String>,
    pub notes: Option<String>,
    /// Newest first.
    pub activities: Vec<ActivityResponse>,
}

/// The reduced list projection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListItem {
    pub id: i64,
    pub company: String,
    pub role: String,
    pub status: ApplicationStatusDto,
    pub applied_at: DateTime<Utc>,
}

/// Envelope of `GET /applications`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListResponse {
    /// Rows matching the filters, before pagination.
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub results: Vec<ApplicationListItem>,
}

/// Query string of `GET /applications`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListApplicationsParams {
    /// Exact status match, by name or numeric code.
    pub status: Option<String>,
    /// One of `company`, `role`, `date`; anything else sorts by newest id.
    pub sort_by: Option<String>,
    /// Case-sensitive substring of the company name.
    pub company: Option<String>,
    /// 1-indexed, defaults to 1.
    pub page: Option<i64>,
    /// Defaults to 10, capped at 100.
    pub page_size: Option<i64>,
}

//=========================================================================================
// Activity Payloads
//=========================================================================================

/// Body of `POST /applications/{applicationId}/activities`.
/// Id, owner and timestamp are assigned by the server.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateActivityRequest {
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub kind: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: i64,
    pub job_application_id: i64,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
    pub details: Option<String>,
}

//=========================================================================================
// Health
//=========================================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_accepts_names_in_any_case_and_codes() {
        let by_code: ApplicationStatusDto = serde_json::from_value(json!(1)).unwrap();
        assert_eq!(by_code, ApplicationStatusDto::Applied);
        let by_name: ApplicationStatusDto = serde_json::from_value(json!("screening")).unwrap();
        assert_eq!(by_name, ApplicationStatusDto::Screening);
        let numeric_text: ApplicationStatusDto = serde_json::from_value(json!("4")).unwrap();
        assert_eq!(numeric_text, ApplicationStatusDto::Offer);
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!(serde_json::from_value::<ApplicationStatusDto>(json!("Ghosted")).is_err());
        assert!(serde_json::from_value::<ApplicationStatusDto>(json!(7)).is_err());
        assert!(serde_json::from_value::<ApplicationStatusDto>(json!(true)).is_err());
    }

    #[test]
    fn status_still_serializes_by_name() {
        assert_eq!(serde_json::to_value(ApplicationStatusDto::Withdrawn).unwrap(), json!("Withdrawn"));
    }

    #[test]
    fn null_required_strings_read_as_empty() {
        let request: CreateApplicationRequest =
            serde_json::from_value(json!({"company": null, "role": null})).unwrap();
        assert_eq!(request.company, "");
        assert_eq!(request.role, "");

        let activity: CreateActivityRequest = serde_json::from_value(json!({"type": null})).unwrap();
        assert_eq!(activity.kind, "");
    }
}
