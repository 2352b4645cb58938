//! Review Use Case
//!
//! Staff approve or reject registrations, one at a time or in bulk.
//! Registration numbers are never touched by a review.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{ElderId, VolunteerId};

use crate::domain::entity::approval::{Approval, RejectionReason};
use crate::domain::entity::{elder::Elder, volunteer::Volunteer};
use crate::domain::repository::{ElderRepository, VolunteerRepository};
use crate::error::{RegistryError, RegistryResult};

/// A staff decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject(RejectionReason),
}

impl ReviewDecision {
    pub fn reject(reason: &str) -> RegistryResult<Self> {
        RejectionReason::new(reason).map(Self::Reject)
    }

    /// From a form `action` of `approve` or `reject`
    pub fn parse(action: &str, reason: Option<&str>) -> RegistryResult<Self> {
        match action.trim() {
            "approve" => Ok(Self::Approve),
            "reject" => Self::reject(reason.unwrap_or_default()),
            other => Err(RegistryError::Validation(format!(
                "Unknown review action `{}`",
                other
            ))),
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Reject(_) => "rejected",
        }
    }

    fn apply(&self, approval: &mut Approval, staff: &str, now: DateTime<Utc>) {
        match self {
            Self::Approve => approval.approve(staff, now),
            Self::Reject(reason) => approval.reject(reason),
        }
    }
}

/// Review use case
pub struct ReviewUseCase<E, V>
where
    E: ElderRepository,
    V: VolunteerRepository,
{
    elder_repo: Arc<E>,
    volunteer_repo: Arc<V>,
}

impl<E, V> ReviewUseCase<E, V>
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

    pub async fn review_elder(
        &self,
        id: ElderId,
        decision: &ReviewDecision,
        staff: &str,
    ) -> RegistryResult<Elder> {
        let mut elder = self
            .elder_repo
            .find_by_id(id)
            .await?
            .ok_or(RegistryError::RecordNotFound)?;

        let now = Utc::now();
        decision.apply(&mut elder.approval, staff, now);
        elder.touch(now);
        self.elder_repo.save_approval(&elder).await?;

        tracing::info!(
            registration_number = %elder.registration_number,
            status = %elder.approval.status,
            staff = %staff,
            "Elder registration reviewed"
        );

        Ok(elder)
    }

    pub async fn review_volunteer(
        &self,
        id: VolunteerId,
        decision: &ReviewDecision,
        staff: &str,
    ) -> RegistryResult<Volunteer> {
        let mut volunteer = self
            .volunteer_repo
            .find_by_id(id)
            .await?
            .ok_or(RegistryError::RecordNotFound)?;

        let now = Utc::now();
        decision.apply(&mut volunteer.approval, staff, now);
        volunteer.touch(now);
        self.volunteer_repo.save_approval(&volunteer).await?;

        tracing::info!(
            volunteer_number = %volunteer.volunteer_number,
            status = %volunteer.approval.status,
            staff = %staff,
            "Volunteer registration reviewed"
        );

        Ok(volunteer)
    }

    /// Apply one decision to many elders. Unknown ids are skipped.
    /// Returns how many were updated.
    pub async fn bulk_review_elders(
        &self,
        ids: &[ElderId],
        decision: &ReviewDecision,
        staff: &str,
    ) -> RegistryResult<u64> {
        let mut seen = HashSet::new();
        let mut updated = 0;
        let now = Utc::now();

        for id in ids.iter().filter(|id| seen.insert(**id)) {
            let Some(mut elder) = self.elder_repo.find_by_id(*id).await? else {
                continue;
            };
            decision.apply(&mut elder.approval, staff, now);
            elder.touch(now);
            self.elder_repo.save_approval(&elder).await?;
            updated += 1;
        }

        tracing::info!(
            requested = ids.len(),
            updated,
            decision = decision.verb(),
            staff = %staff,
            "Bulk elder review"
        );

        Ok(updated)
    }

    pub async fn bulk_review_volunteers(
        &self,
        ids: &[VolunteerId],
        decision: &ReviewDecision,
        staff: &str,
    ) -> RegistryResult<u64> {
        let mut seen = HashSet::new();
        let mut updated = 0;
        let now = Utc::now();

        for id in ids.iter().filter(|id| seen.insert(**id)) {
            let Some(mut volunteer) = self.volunteer_repo.find_by_id(*id).await? else {
                continue;
            };
            decision.apply(&mut volunteer.approval, staff, now);
            volunteer.touch(now);
            self.volunteer_repo.save_approval(&volunteer).await?;
            updated += 1;
        }

        tracing::info!(
            requested = ids.len(),
            updated,
            decision = decision.verb(),
            staff = %staff,
            "Bulk volunteer review"
        );

        Ok(updated)
    }
}
