//! Contact Inquiry Use Cases

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::InquiryId;
use kernel::page::{Page, PageRequest};

use crate::application::config::OutreachConfig;
use crate::domain::entity::inquiry::{Inquiry, InquirySubmission};
use crate::domain::repository::{InquiryQuery, InquiryRepository};
use crate::domain::value_object::resolution::ResolutionFilter;
use crate::error::{OutreachError, OutreachResult};

pub const INQUIRY_THANKS: &str = "Thank you for your message! We will get back to you soon.";

/// Submit inquiry use case
pub struct SubmitInquiryUseCase<R>
where
    R: InquiryRepository,
{
    repo: Arc<R>,
}

impl<R> SubmitInquiryUseCase<R>
where
    R: InquiryRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, submission: InquirySubmission) -> OutreachResult<Inquiry> {
        self.execute_at(submission, Utc::now()).await
    }

    pub async fn execute_at(
        &self,
        submission: InquirySubmission,
        now: DateTime<Utc>,
    ) -> OutreachResult<Inquiry> {
        let inquiry = Inquiry::submit(submission, now)?;
        self.repo.insert(&inquiry).await?;
        tracing::info!(inquiry_id = %inquiry.id, "Contact inquiry received");
        Ok(inquiry)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryAction {
    Resolve,
    Unresolve,
}

impl InquiryAction {
    pub fn parse(action: &str) -> OutreachResult<Self> {
        match action.trim() {
            "resolve" => Ok(Self::Resolve),
            "unresolve" => Ok(Self::Unresolve),
            other => Err(OutreachError::Validation(format!(
                "Unknown inquiry action `{}`",
                other
            ))),
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Resolve => "marked as resolved",
            Self::Unresolve => "marked as unresolved",
        }
    }

    fn resolved(&self) -> bool {
        matches!(self, Self::Resolve)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InquiryListParams {
    pub page: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Staff inquiry management
pub struct ManageInquiriesUseCase<R>
where
    R: InquiryRepository,
{
    repo: Arc<R>,
    config: Arc<OutreachConfig>,
}

impl<R> ManageInquiriesUseCase<R>
where
    R: InquiryRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<OutreachConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn list(&self, params: &InquiryListParams) -> OutreachResult<Page<Inquiry>> {
        let query = InquiryQuery::new(
            ResolutionFilter::parse(params.status.as_deref()),
            params.search.as_deref(),
            PageRequest::parse(params.page.as_deref(), self.config.staff_page_size),
        );
        self.repo.list(&query).await
    }

    pub async fn get(&self, id: InquiryId) -> OutreachResult<Inquiry> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(OutreachError::InquiryNotFound)
    }

    pub async fn apply(
        &self,
        id: InquiryId,
        action: InquiryAction,
        staff: &str,
    ) -> OutreachResult<Inquiry> {
        let mut inquiry = self.get(id).await?;
        inquiry.is_resolved = action.resolved();
        self.repo.save_resolution(&inquiry).await?;

        tracing::info!(
            inquiry_id = %inquiry.id,
            resolved = inquiry.is_resolved,
            staff = %staff,
            "Inquiry updated"
        );

        Ok(inquiry)
    }

    /// Unknown ids are skipped.
    pub async fn bulk(
        &self,
        ids: &[InquiryId],
        action: InquiryAction,
        staff: &str,
    ) -> OutreachResult<u64> {
        let mut seen = HashSet::new();
        let mut updated = 0;

        for id in ids.iter().copied().filter(|id| seen.insert(*id)) {
            let Some(mut inquiry) = self.repo.find_by_id(id).await? else {
                continue;
            };
            inquiry.is_resolved = action.resolved();
            self.repo.save_resolution(&inquiry).await?;
            updated += 1;
        }

        tracing::info!(updated, staff = %staff, action = action.verb(), "Bulk inquiry update");
        Ok(updated)
    }
}
