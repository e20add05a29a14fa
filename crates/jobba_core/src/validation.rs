//! crates/jobba_core/src/validation.rs
//!
//! Input checks run before anything reaches a store. The first failing rule
//! wins and its message is returned verbatim to the caller.

pub const COMPANY_MAX_LEN: usize = 200;
pub const ROLE_MAX_LEN: usize = 200;
pub const SALARY_RANGE_MAX_LEN: usize = 100;
pub const ACTIVITY_TYPE_MAX_LEN: usize = 100;
pub const ACTIVITY_DETAILS_MAX_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: &str) -> Self {
        Self(message.to_string())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// The fields shared by create and update payloads that carry rules.
#[derive(Debug, Clone, Copy)]
pub struct ApplicationFields<'a> {
    pub company: &'a str,
    pub role: &'a str,
    pub salary_range: Option<&'a str>,
}

/// Lengths are counted in UTF-16 code units over the raw input, so a character
/// outside the Basic Multilingual Plane counts twice.
fn too_long(value: &str, max: usize) -> bool {
    value.encode_utf16().count() > max
}

pub fn validate_application(fields: ApplicationFields<'_>) -> Result<(), ValidationError> {
    if fields.company.trim().is_empty() {
        return Err(ValidationError::new("Company is required."));
    }
    if too_long(fields.company, COMPANY_MAX_LEN) {
        return Err(ValidationError::new("Company max length is 200."));
    }
    if fields.role.trim().is_empty() {
        return Err(ValidationError::new("Role is required."));
    }
    if too_long(fields.role, ROLE_MAX_LEN) {
        return Err(ValidationError::new("Role max length is 200."));
    }
    if let Some(salary_range) = fields.salary_range {
        if too_long(salary_range, SALARY_RANGE_MAX_LEN) {
            return Err(ValidationError::new("SalaryRange max length is 100."));
        }
    }
    Ok(())
}

pub fn validate_activity(kind: &str, details: Option<&str>) -> Result<(), ValidationError> {
    if kind.trim().is_empty() {
        return Err(ValidationError::new("Type is required."));
    }
    if too_long(kind, ACTIVITY_TYPE_MAX_LEN) {
        return Err(ValidationError::new("Type max length is 100."));
    }
    if let Some(details) = details {
        if too_long(details, ACTIVITY_DETAILS_MAX_LEN) {
            return Err(ValidationError::new("Details max length is 1000."));
        }
    }
    Ok(())
}
