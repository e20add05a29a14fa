pub mod domain;
pub mod ports;
pub mod query;
pub mod validation;

pub use domain::{Activity, ApplicationStatus, JobApplication, NewActivity, NewApplication, UnknownStatus};
pub use ports::{DatabaseService, PortError, PortResult};
pub use query::{ApplicationQuery, Page, SortBy};
pub use validation::{validate_activity, validate_application, ApplicationFields, ValidationError};
