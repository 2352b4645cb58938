//! In-Memory Repository
//!
//! Mirrors the SQL ordering and search rules without a database. Used by
//! tests and local experiments.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{DonationId, InquiryId, TestimonialId};
use kernel::page::Page;
use kernel::search::contains_ignore_case;
use tokio::sync::Mutex;

use crate::domain::entity::{donation::Donation, inquiry::Inquiry, testimonial::Testimonial};
use crate::domain::repository::{
    DonationCounts, DonationQuery, DonationRepository, InquiryCounts, InquiryQuery,
    InquiryRepository, TestimonialQuery, TestimonialRepository,
};
use crate::domain::value_object::donation::DonationStatus;
use crate::error::OutreachResult;

#[derive(Clone, Default)]
pub struct InMemoryOutreachRepository {
    donations: Arc<Mutex<Vec<Donation>>>,
    inquiries: Arc<Mutex<Vec<Inquiry>>>,
    testimonials: Arc<Mutex<Vec<Testimonial>>>,
}

impl InMemoryOutreachRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first; among equal timestamps the later insert comes first.
fn newest_first<T: Clone>(items: &[T], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut sorted: Vec<T> = items.iter().rev().cloned().collect();
    sorted.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    sorted
}

impl DonationRepository for InMemoryOutreachRepository {
    async fn insert(&self, donation: &Donation) -> OutreachResult<()> {
        self.donations.lock().await.push(donation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: DonationId) -> OutreachResult<Option<Donation>> {
        let donations = self.donations.lock().await;
        Ok(donations.iter().find(|d| d.id == id).cloned())
    }

    async fn save_status(&self, donation: &Donation) -> OutreachResult<()> {
        let mut donations = self.donations.lock().await;
        if let Some(stored) = donations.iter_mut().find(|d| d.id == donation.id) {
            stored.status = donation.status;
            stored.fulfilled_at = donation.fulfilled_at;
            stored.fulfilled_by = donation.fulfilled_by.clone();
            stored.updated_at = donation.updated_at;
        }
        Ok(())
    }

    async fn list(&self, query: &DonationQuery) -> OutreachResult<Page<Donation>> {
        let donations = self.donations.lock().await;
        let needle = query.search.as_deref().map(str::to_lowercase);

        let matching: Vec<Donation> = newest_first(&donations, |d| d.created_at)
            .into_iter()
            .filter(|d| query.status.is_none_or(|s| s == d.status))
            .filter(|d| query.donation_type.is_none_or(|t| t == d.donation_type))
            .filter(|d| match &needle {
                None => true,
                Some(n) => {
                    contains_ignore_case(&d.donor_name, n)
                        || contains_ignore_case(d.donor_email.as_str(), n)
                        || contains_ignore_case(&d.description, n)
                }
            })
            .collect();

        Ok(Page::from_vec(matching, query.page))
    }

    async fn counts(&self) -> OutreachResult<DonationCounts> {
        let donations = self.donations.lock().await;
        Ok(donations
            .iter()
            .fold(DonationCounts::default(), |mut counts, d| {
                counts.total += 1;
                match d.status {
                    DonationStatus::Pending => counts.pending += 1,
                    DonationStatus::Fulfilled => counts.fulfilled += 1,
                    DonationStatus::Cancelled => counts.cancelled += 1,
                }
                counts
            }))
    }

    async fn recent_pending(&self, limit: u32) -> OutreachResult<Vec<Donation>> {
        let donations = self.donations.lock().await;
        Ok(newest_first(&donations, |d| d.created_at)
            .into_iter()
            .filter(|d| d.status == DonationStatus::Pending)
            .take(limit as usize)
            .collect())
    }
}

impl InquiryRepository for InMemoryOutreachRepository {
    async fn insert(&self, inquiry: &Inquiry) -> OutreachResult<()> {
        self.inquiries.lock().await.push(inquiry.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: InquiryId) -> OutreachResult<Option<Inquiry>> {
        let inquiries = self.inquiries.lock().await;
        Ok(inquiries.iter().find(|i| i.id == id).cloned())
    }

    async fn save_resolution(&self, inquiry: &Inquiry) -> OutreachResult<()> {
        let mut inquiries = self.inquiries.lock().await;
        if let Some(stored) = inquiries.iter_mut().find(|i| i.id == inquiry.id) {
            stored.is_resolved = inquiry.is_resolved;
        }
        Ok(())
    }

    async fn list(&self, query: &InquiryQuery) -> OutreachResult<Page<Inquiry>> {
        let inquiries = self.inquiries.lock().await;
        let needle = query.search.as_deref().map(str::to_lowercase);

        let matching: Vec<Inquiry> = newest_first(&inquiries, |i| i.created_at)
            .into_iter()
            .filter(|i| query.resolution.matches(i.is_resolved))
            .filter(|i| match &needle {
                None => true,
                Some(n) => {
                    contains_ignore_case(&i.name, n)
                        || contains_ignore_case(i.email.as_str(), n)
                        || contains_ignore_case(&i.subject, n)
                }
            })
            .collect();

        Ok(Page::from_vec(matching, query.page))
    }

    async fn counts(&self) -> OutreachResult<InquiryCounts> {
        let inquiries = self.inquiries.lock().await;
        Ok(InquiryCounts {
            total: inquiries.len() as u64,
            unresolved: inquiries.iter().filter(|i| !i.is_resolved).count() as u64,
        })
    }
}

impl TestimonialRepository for InMemoryOutreachRepository {
    async fn insert(&self, testimonial: &Testimonial) -> OutreachResult<()> {
        self.testimonials.lock().await.push(testimonial.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TestimonialId) -> OutreachResult<Option<Testimonial>> {
        let testimonials = self.testimonials.lock().await;
        Ok(testimonials.iter().find(|t| t.id == id).cloned())
    }

    async fn save_visibility(&self, testimonial: &Testimonial) -> OutreachResult<()> {
        let mut testimonials = self.testimonials.lock().await;
        if let Some(stored) = testimonials.iter_mut().find(|t| t.id == testimonial.id) {
            stored.is_active = testimonial.is_active;
        }
        Ok(())
    }

    async fn list(&self, query: &TestimonialQuery) -> OutreachResult<Page<Testimonial>> {
        let testimonials = self.testimonials.lock().await;
        let matching: Vec<Testimonial> = newest_first(&testimonials, |t| t.created_at)
            .into_iter()
            .filter(|t| !query.active_only || t.is_active)
            .collect();
        Ok(Page::from_vec(matching, query.page))
    }
}
