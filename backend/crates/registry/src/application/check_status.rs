//! Check Status Use Case
//!
//! Public lookup of a registration by the number its holder was given.
//! Matching ignores case and surrounding whitespace.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entity::approval::Approval;
use crate::domain::repository::{ElderRepository, VolunteerRepository};
use crate::domain::value_object::approval_status::ApprovalStatus;
use crate::domain::value_object::registration_number::{RegistrationNumber, normalize_lookup};
use crate::error::{RegistryError, RegistryResult};

/// What a registrant may see about their own registration
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub number: RegistrationNumber,
    pub full_name: String,
    pub status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl StatusReport {
    fn new(
        number: RegistrationNumber,
        full_name: &str,
        approval: &Approval,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            number,
            full_name: full_name.to_string(),
            status: approval.status,
            rejection_reason: approval.visible_rejection_reason().map(str::to_string),
            submitted_at,
            approved_at: approval.approved_at,
        }
    }
}

/// Check status use case
pub struct CheckStatusUseCase<E, V>
where
    E: ElderRepository,
    V: VolunteerRepository,
{
    elder_repo: Arc<E>,
    volunteer_repo: Arc<V>,
}

impl<E, V> CheckStatusUseCase<E, V>
where
    E: ElderRepository,
    V: VolunteerRepository,
{
    pub fn new(elder_repo: Arc<E>, volunteer_repo: Arc<V>) -> Self {
        Self {
            elder_repo,
            volunteer_repo,
        }
    }

    pub async fn elder(&self, raw_number: &str) -> RegistryResult<StatusReport> {
        let number = normalize_lookup(raw_number);
        if number.is_empty() {
            return Err(RegistryError::ElderNotFound);
        }

        let elder = self
            .elder_repo
            .find_by_number(&number)
            .await?
            .ok_or(RegistryError::ElderNotFound)?;

        tracing::debug!(registration_number = %elder.registration_number, "Elder status checked");

        Ok(StatusReport::new(
            elder.registration_number,
            &elder.full_name,
            &elder.approval,
            elder.created_at,
        ))
    }

    pub async fn volunteer(&self, raw_number: &str) -> RegistryResult<StatusReport> {
        let number = normalize_lookup(raw_number);
        if number.is_empty() {
            return Err(RegistryError::VolunteerNotFound);
        }

        let volunteer = self
            .volunteer_repo
            .find_by_number(&number)
            .await?
            .ok_or(RegistryError::VolunteerNotFound)?;

        tracing::debug!(volunteer_number = %volunteer.volunteer_number, "Volunteer status checked");

        Ok(StatusReport::new(
            volunteer.volunteer_number,
            &volunteer.full_name,
            &volunteer.approval,
            volunteer.created_at,
        ))
    }
}
