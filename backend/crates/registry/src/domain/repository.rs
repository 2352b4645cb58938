//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in `infra`.
//!
//! `insert` must enforce uniqueness of the registration number and report a
//! clash as [`RegistryError::DuplicateRegistrationNumber`]; the registration
//! use cases depend on that to recover from concurrent allocations.
//!
//! [`RegistryError::DuplicateRegistrationNumber`]: crate::error::RegistryError::DuplicateRegistrationNumber

use kernel::id::{ElderId, VolunteerId};
use kernel::page::{Page, PageRequest};

use crate::domain::entity::{elder::Elder, volunteer::Volunteer};
use crate::domain::value_object::approval_status::StatusFilter;
use crate::error::RegistryResult;

/// Staff list query.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub status: StatusFilter,
    /// Case-insensitive substring; `None` matches everything
    pub search: Option<String>,
    pub page: PageRequest,
}

impl ListQuery {
    pub fn new(status: StatusFilter, search: Option<&str>, page: PageRequest) -> Self {
        Self {
            status,
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            page,
        }
    }
}

/// Registrations per approval status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

/// Elder repository trait
#[trait_variant::make(ElderRepository: Send)]
pub trait LocalElderRepository {
    /// Number of elders whose registration number starts with `bucket_prefix`
    async fn count_issued(&self, bucket_prefix: &str) -> RegistryResult<u64>;

    /// Persist a new elder
    async fn insert(&self, elder: &Elder) -> RegistryResult<()>;

    async fn find_by_id(&self, id: ElderId) -> RegistryResult<Option<Elder>>;

    /// Exact match on the canonical (uppercase) registration number
    async fn find_by_number(&self, number: &str) -> RegistryResult<Option<Elder>>;

    /// Write back approval fields and `updated_at`
    async fn save_approval(&self, elder: &Elder) -> RegistryResult<()>;

    /// Newest first. Search covers number, full name and guardian name.
    async fn list(&self, query: &ListQuery) -> RegistryResult<Page<Elder>>;

    async fn status_counts(&self) -> RegistryResult<StatusCounts>;

    /// Most recent pending registrations
    async fn recent_pending(&self, limit: u32) -> RegistryResult<Vec<Elder>>;
}

/// Volunteer repository trait
#[trait_variant::make(VolunteerRepository: Send)]
pub trait LocalVolunteerRepository {
    /// Number of volunteers whose number starts with `bucket_prefix`
    async fn count_issued(&self, bucket_prefix: &str) -> RegistryResult<u64>;

    /// Persist a new volunteer
    async fn insert(&self, volunteer: &Volunteer) -> RegistryResult<()>;

    async fn find_by_id(&self, id: VolunteerId) -> RegistryResult<Option<Volunteer>>;

    /// Exact match on the canonical (uppercase) volunteer number
    async fn find_by_number(&self, number: &str) -> RegistryResult<Option<Volunteer>>;

    async fn save_approval(&self, volunteer: &Volunteer) -> RegistryResult<()>;

    /// Newest first. Search covers number, full name and email.
    async fn list(&self, query: &ListQuery) -> RegistryResult<Page<Volunteer>>;

    async fn status_counts(&self) -> RegistryResult<StatusCounts>;

    async fn recent_pending(&self, limit: u32) -> RegistryResult<Vec<Volunteer>>;
}
