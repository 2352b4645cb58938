//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in `infra`.

use kernel::id::{DonationId, InquiryId, TestimonialId};
use kernel::page::{Page, PageRequest};

use crate::domain::entity::{donation::Donation, inquiry::Inquiry, testimonial::Testimonial};
use crate::domain::value_object::donation::{DonationStatus, DonationType};
use crate::domain::value_object::resolution::ResolutionFilter;
use crate::error::OutreachResult;

fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Staff donation list query. `None` filters match everything.
#[derive(Debug, Clone)]
pub struct DonationQuery {
    pub status: Option<DonationStatus>,
    pub donation_type: Option<DonationType>,
    /// Case-insensitive substring of donor name, email or description
    pub search: Option<String>,
    pub page: PageRequest,
}

impl DonationQuery {
    pub fn new(
        status: Option<&str>,
        donation_type: Option<&str>,
        search: Option<&str>,
        page: PageRequest,
    ) -> Self {
        Self {
            status: status.map(str::trim).and_then(DonationStatus::from_code),
            donation_type: donation_type.map(str::trim).and_then(DonationType::from_code),
            search: normalize_search(search),
            page,
        }
    }
}

/// Staff inquiry list query.
#[derive(Debug, Clone)]
pub struct InquiryQuery {
    pub resolution: ResolutionFilter,
    /// Case-insensitive substring of name, email or subject
    pub search: Option<String>,
    pub page: PageRequest,
}

impl InquiryQuery {
    pub fn new(resolution: ResolutionFilter, search: Option<&str>, page: PageRequest) -> Self {
        Self {
            resolution,
            search: normalize_search(search),
            page,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TestimonialQuery {
    /// Only testimonials shown on the public site
    pub active_only: bool,
    pub page: PageRequest,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DonationCounts {
    pub total: u64,
    pub pending: u64,
    pub fulfilled: u64,
    pub cancelled: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InquiryCounts {
    pub total: u64,
    pub unresolved: u64,
}

/// Donation repository trait
#[trait_variant::make(DonationRepository: Send)]
pub trait LocalDonationRepository {
    async fn insert(&self, donation: &Donation) -> OutreachResult<()>;

    async fn find_by_id(&self, id: DonationId) -> OutreachResult<Option<Donation>>;

    /// Persist status and fulfilment fields
    async fn save_status(&self, donation: &Donation) -> OutreachResult<()>;

    /// Newest first
    async fn list(&self, query: &DonationQuery) -> OutreachResult<Page<Donation>>;

    async fn counts(&self) -> OutreachResult<DonationCounts>;

    /// Newest pending donations
    async fn recent_pending(&self, limit: u32) -> OutreachResult<Vec<Donation>>;
}

/// Inquiry repository trait
#[trait_variant::make(InquiryRepository: Send)]
pub trait LocalInquiryRepository {
    async fn insert(&self, inquiry: &Inquiry) -> OutreachResult<()>;

    async fn find_by_id(&self, id: InquiryId) -> OutreachResult<Option<Inquiry>>;

    async fn save_resolution(&self, inquiry: &Inquiry) -> OutreachResult<()>;

    /// Newest first
    async fn list(&self, query: &InquiryQuery) -> OutreachResult<Page<Inquiry>>;

    async fn counts(&self) -> OutreachResult<InquiryCounts>;
}

/// Testimonial repository trait
#[trait_variant::make(TestimonialRepository: Send)]
pub trait LocalTestimonialRepository {
    async fn insert(&self, testimonial: &Testimonial) -> OutreachResult<()>;

    async fn find_by_id(&self, id: TestimonialId) -> OutreachResult<Option<Testimonial>>;

    async fn save_visibility(&self, testimonial: &Testimonial) -> OutreachResult<()>;

    /// Newest first
    async fn list(&self, query: &TestimonialQuery) -> OutreachResult<Page<Testimonial>>;
}
