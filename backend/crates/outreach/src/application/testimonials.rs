//! Testimonial Use Cases
//!
//! The public site shows active testimonials; staff write them and switch
//! them on and off.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::TestimonialId;
use kernel::page::{Page, PageRequest};

use crate::application::config::OutreachConfig;
use crate::domain::entity::testimonial::{Testimonial, TestimonialSubmission};
use crate::domain::repository::{TestimonialQuery, TestimonialRepository};
use crate::error::{OutreachError, OutreachResult};

pub struct TestimonialsUseCase<R>
where
    R: TestimonialRepository,
{
    repo: Arc<R>,
    config: Arc<OutreachConfig>,
}

impl<R> TestimonialsUseCase<R>
where
    R: TestimonialRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<OutreachConfig>) -> Self {
        Self { repo, config }
    }

    /// Active testimonials, newest first
    pub async fn public_page(&self, page: Option<&str>) -> OutreachResult<Page<Testimonial>> {
        self.repo
            .list(&TestimonialQuery {
                active_only: true,
                page: PageRequest::parse(page, self.config.testimonial_page_size),
            })
            .await
    }

    /// Every testimonial, for staff
    pub async fn staff_page(&self, page: Option<&str>) -> OutreachResult<Page<Testimonial>> {
        self.repo
            .list(&TestimonialQuery {
                active_only: false,
                page: PageRequest::parse(page, self.config.staff_page_size),
            })
            .await
    }

    pub async fn create(&self, submission: TestimonialSubmission) -> OutreachResult<Testimonial> {
        self.create_at(submission, Utc::now()).await
    }

    pub async fn create_at(
        &self,
        submission: TestimonialSubmission,
        now: DateTime<Utc>,
    ) -> OutreachResult<Testimonial> {
        let testimonial = Testimonial::create(submission, now)?;
        self.repo.insert(&testimonial).await?;
        tracing::info!(
            testimonial_id = %testimonial.id,
            rating = testimonial.rating.value(),
            "Testimonial created"
        );
        Ok(testimonial)
    }

    pub async fn set_active(&self, id: TestimonialId, active: bool) -> OutreachResult<Testimonial> {
        let mut testimonial = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(OutreachError::TestimonialNotFound)?;
        testimonial.is_active = active;
        self.repo.save_visibility(&testimonial).await?;
        Ok(testimonial)
    }

    /// Unknown ids are skipped.
    pub async fn bulk_set_active(&self, ids: &[TestimonialId], active: bool) -> OutreachResult<u64> {
        let mut seen = HashSet::new();
        let mut updated = 0;

        for id in ids.iter().copied().filter(|id| seen.insert(*id)) {
            let Some(mut testimonial) = self.repo.find_by_id(id).await? else {
                continue;
            };
            testimonial.is_active = active;
            self.repo.save_visibility(&testimonial).await?;
            updated += 1;
        }

        tracing::info!(updated, active, "Bulk testimonial update");
        Ok(updated)
    }
}
