//! Donation Use Cases
//!
//! Public donation offers and their handling by staff.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::DonationId;
use kernel::page::{Page, PageRequest};

use crate::application::config::OutreachConfig;
use crate::domain::entity::donation::{Donation, DonationSubmission};
use crate::domain::repository::{DonationQuery, DonationRepository};
use crate::error::{OutreachError, OutreachResult};

pub const DONATION_THANKS: &str = "Thank you for your donation! We will contact you soon.";

/// Submit donation use case
pub struct SubmitDonationUseCase<R>
where
    R: DonationRepository,
{
    repo: Arc<R>,
}

impl<R> SubmitDonationUseCase<R>
where
    R: DonationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, submission: DonationSubmission) -> OutreachResult<Donation> {
        self.execute_at(submission, Utc::now()).await
    }

    pub async fn execute_at(
        &self,
        submission: DonationSubmission,
        now: DateTime<Utc>,
    ) -> OutreachResult<Donation> {
        let donation = Donation::submit(submission, now)?;
        self.repo.insert(&donation).await?;

        tracing::info!(
            donation_id = %donation.id,
            donation_type = %donation.donation_type,
            "Donation offered"
        );

        Ok(donation)
    }
}

/// A staff action on a donation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonationAction {
    Fulfill,
    Cancel,
    /// Back to pending
    Reopen,
}

impl DonationAction {
    pub fn parse(action: &str) -> OutreachResult<Self> {
        match action.trim() {
            "fulfill" => Ok(Self::Fulfill),
            "cancel" => Ok(Self::Cancel),
            "reopen" | "pending" => Ok(Self::Reopen),
            other => Err(OutreachError::Validation(format!(
                "Unknown donation action `{}`",
                other
            ))),
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Fulfill => "marked as fulfilled",
            Self::Cancel => "cancelled",
            Self::Reopen => "marked as pending",
        }
    }

    fn apply(&self, donation: &mut Donation, staff: &str, now: DateTime<Utc>) {
        match self {
            Self::Fulfill => donation.fulfill(staff, now),
            Self::Cancel => donation.cancel(now),
            Self::Reopen => donation.reopen(now),
        }
    }
}

/// Raw list parameters as they arrive from the query string
#[derive(Debug, Clone, Default)]
pub struct DonationListParams {
    pub page: Option<String>,
    pub status: Option<String>,
    pub donation_type: Option<String>,
    pub search: Option<String>,
}

/// Staff donation management
pub struct ManageDonationsUseCase<R>
where
    R: DonationRepository,
{
    repo: Arc<R>,
    config: Arc<OutreachConfig>,
}

impl<R> ManageDonationsUseCase<R>
where
    R: DonationRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<OutreachConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn list(&self, params: &DonationListParams) -> OutreachResult<Page<Donation>> {
        let query = DonationQuery::new(
            params.status.as_deref(),
            params.donation_type.as_deref(),
            params.search.as_deref(),
            PageRequest::parse(params.page.as_deref(), self.config.staff_page_size),
        );
        self.repo.list(&query).await
    }

    pub async fn get(&self, id: DonationId) -> OutreachResult<Donation> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(OutreachError::DonationNotFound)
    }

    pub async fn apply(
        &self,
        id: DonationId,
        action: DonationAction,
        staff: &str,
    ) -> OutreachResult<Donation> {
        let mut donation = self.get(id).await?;
        action.apply(&mut donation, staff, Utc::now());
        self.repo.save_status(&donation).await?;

        tracing::info!(
            donation_id = %donation.id,
            status = %donation.status,
            staff = %staff,
            "Donation updated"
        );

        Ok(donation)
    }

    /// Apply one action to many donations. Unknown ids are skipped.
    pub async fn bulk(
        &self,
        ids: &[DonationId],
        action: DonationAction,
        staff: &str,
    ) -> OutreachResult<u64> {
        let now = Utc::now();
        let mut seen = HashSet::new();
        let mut updated = 0;

        for id in ids.iter().copied().filter(|id| seen.insert(*id)) {
            let Some(mut donation) = self.repo.find_by_id(id).await? else {
                continue;
            };
            action.apply(&mut donation, staff, now);
            self.repo.save_status(&donation).await?;
            updated += 1;
        }

        tracing::info!(updated, staff = %staff, action = action.verb(), "Bulk donation update");
        Ok(updated)
    }
}
