//! services/api/src/bootstrap.rs
//!
//! One-time sample data inserted on first start.

use chrono::Utc;
use jobba_core::domain::{ApplicationStatus, NewApplication};
use jobba_core::ports::{DatabaseService, PortResult};
use tracing::info;

fn sample(
    company: &str,
    role: &str,
    status: ApplicationStatus,
    source: &str,
    location: &str,
) -> NewApplication {
    NewApplication {
        company: company.to_string(),
        role: role.to_string(),
        source: Some(source.to_string()),
        status,
        location: Some(location.to_string()),
        salary_range: None,
        applied_at: Utc::now(),
        next_action: None,
        notes: None,
    }
}

fn sample_applications() -> Vec<NewApplication> {
    let mut partner_stack = sample(
        "PartnerStack",
        "T1 Support Agent",
        ApplicationStatus::Applied,
        "Posting",
        "Remote",
    );
    partner_stack.next_action = Some("Follow-up Tue".to_string());

    let mut foundant = sample(
        "Foundant",
        "Junior Dev",
        ApplicationStatus::Screening,
        "Referral",
        "Remote",
    );
    foundant.next_action = Some("Prep for call".to_string());

    let mut local_msp = sample(
        "Local MSP",
        "IT Support",
        ApplicationStatus::Draft,
        "Indeed",
        "Medicine Hat",
    );
    local_msp.notes = Some("Tailor resume".to_string());

    vec![partner_stack, foundant, local_msp]
}

/// Inserts the sample applications only when the store holds none.
/// Returns how many rows were inserted.
pub async fn ensure_seed(db: &dyn DatabaseService) -> PortResult<usize> {
    if db.count_applications().await? > 0 {
        info!("Applications present, skipping seed data.");
        return Ok(0);
    }

    let samples = sample_applications();
    let inserted = samples.len();
    for application in samples {
        db.create_application(application).await?;
    }
    info!(inserted, "Seed data inserted.");
    Ok(inserted)
}
