//! Outreach Statistics

use std::sync::Arc;

use kernel::page::PageRequest;

use crate::application::config::OutreachConfig;
use crate::domain::entity::{donation::Donation, testimonial::Testimonial};
use crate::domain::repository::{
    DonationCounts, DonationRepository, InquiryCounts, InquiryRepository, TestimonialQuery,
    TestimonialRepository,
};
use crate::error::OutreachResult;

/// Public figures
#[derive(Debug, Clone)]
pub struct OutreachOverview {
    pub total_donations: u64,
    /// Newest active testimonials
    pub testimonials: Vec<Testimonial>,
}

/// Staff dashboard figures
#[derive(Debug, Clone)]
pub struct OutreachDashboard {
    pub donations: DonationCounts,
    pub inquiries: InquiryCounts,
    pub recent_pending_donations: Vec<Donation>,
}

pub struct OutreachStatsUseCase<D, I, T>
where
    D: DonationRepository,
    I: InquiryRepository,
    T: TestimonialRepository,
{
    donation_repo: Arc<D>,
    inquiry_repo: Arc<I>,
    testimonial_repo: Arc<T>,
    config: Arc<OutreachConfig>,
}

impl<D, I, T> OutreachStatsUseCase<D, I, T>
where
    D: DonationRepository,
    I: InquiryRepository,
    T: TestimonialRepository,
{
    pub fn new(
        donation_repo: Arc<D>,
        inquiry_repo: Arc<I>,
        testimonial_repo: Arc<T>,
        config: Arc<OutreachConfig>,
    ) -> Self {
        Self {
            donation_repo,
            inquiry_repo,
            testimonial_repo,
            config,
        }
    }

    pub async fn overview(&self) -> OutreachResult<OutreachOverview> {
        let donations = self.donation_repo.counts().await?;
        let highlights = self
            .testimonial_repo
            .list(&TestimonialQuery {
                active_only: true,
                page: PageRequest::first(self.config.testimonial_highlights),
            })
            .await?;

        Ok(OutreachOverview {
            total_donations: donations.total,
            testimonials: highlights.items,
        })
    }

    pub async fn dashboard(&self) -> OutreachResult<OutreachDashboard> {
        Ok(OutreachDashboard {
            donations: self.donation_repo.counts().await?,
            inquiries: self.inquiry_repo.counts().await?,
            recent_pending_donations: self
                .donation_repo
                .recent_pending(self.config.dashboard_recent_limit)
                .await?,
        })
    }
}
