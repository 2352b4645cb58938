//! In-Memory Repository
//!
//! Mirrors the SQL schema's rules (unique numbers, newest-first ordering,
//! case-insensitive search) without a database. Used by tests and local
//! experiments.

use std::sync::Arc;

use kernel::id::{ElderId, VolunteerId};
use kernel::page::Page;
use kernel::search::contains_ignore_case;
use tokio::sync::Mutex;

use crate::domain::entity::approval::Approval;
use crate::domain::entity::{elder::Elder, volunteer::Volunteer};
use crate::domain::repository::{ElderRepository, ListQuery, StatusCounts, VolunteerRepository};
use crate::domain::value_object::approval_status::ApprovalStatus;
use crate::error::{RegistryError, RegistryResult};

#[derive(Clone, Default)]
pub struct InMemoryRegistryRepository {
    elders: Arc<Mutex<Vec<Elder>>>,
    volunteers: Arc<Mutex<Vec<Volunteer>>>,
}

impl InMemoryRegistryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn tally<'a>(approvals: impl Iterator<Item = &'a Approval>) -> StatusCounts {
    approvals.fold(StatusCounts::default(), |mut counts, approval| {
        counts.total += 1;
        match approval.status {
            ApprovalStatus::Pending => counts.pending += 1,
            ApprovalStatus::Approved => counts.approved += 1,
            ApprovalStatus::Rejected => counts.rejected += 1,
        }
        counts
    })
}

/// Newest first; among equal timestamps the later insert comes first.
fn newest_first<T: Clone>(items: &[T], created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>) -> Vec<T> {
    let mut sorted: Vec<T> = items.iter().rev().cloned().collect();
    sorted.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    sorted
}

impl ElderRepository for InMemoryRegistryRepository {
    async fn count_issued(&self, bucket_prefix: &str) -> RegistryResult<u64> {
        let elders = self.elders.lock().await;
        Ok(elders
            .iter()
            .filter(|e| e.registration_number.to_string().starts_with(bucket_prefix))
            .count() as u64)
    }

    async fn insert(&self, elder: &Elder) -> RegistryResult<()> {
        let mut elders = self.elders.lock().await;
        if elders
            .iter()
            .any(|e| e.registration_number == elder.registration_number)
        {
            return Err(RegistryError::DuplicateRegistrationNumber(
                elder.registration_number.to_string(),
            ));
        }
        elders.push(elder.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ElderId) -> RegistryResult<Option<Elder>> {
        let elders = self.elders.lock().await;
        Ok(elders.iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_number(&self, number: &str) -> RegistryResult<Option<Elder>> {
        let elders = self.elders.lock().await;
        Ok(elders
            .iter()
            .find(|e| e.registration_number.to_string() == number)
            .cloned())
    }

    async fn save_approval(&self, elder: &Elder) -> RegistryResult<()> {
        let mut elders = self.elders.lock().await;
        if let Some(stored) = elders.iter_mut().find(|e| e.id == elder.id) {
            stored.approval = elder.approval.clone();
            stored.updated_at = elder.updated_at;
        }
        Ok(())
    }

    async fn list(&self, query: &ListQuery) -> RegistryResult<Page<Elder>> {
        let elders = self.elders.lock().await;
        let needle = query.search.as_deref().map(str::to_lowercase);

        let matching: Vec<Elder> = newest_first(&elders, |e| e.created_at)
            .into_iter()
            .filter(|e| query.status.matches(e.approval.status))
            .filter(|e| match &needle {
                None => true,
                Some(n) => {
                    contains_ignore_case(&e.registration_number.to_string(), n)
                        || contains_ignore_case(&e.full_name, n)
                        || contains_ignore_case(&e.guardian_name, n)
                }
            })
            .collect();

        Ok(Page::from_vec(matching, query.page))
    }

    async fn status_counts(&self) -> RegistryResult<StatusCounts> {
        let elders = self.elders.lock().await;
        Ok(tally(elders.iter().map(|e| &e.approval)))
    }

    async fn recent_pending(&self, limit: u32) -> RegistryResult<Vec<Elder>> {
        let elders = self.elders.lock().await;
        Ok(newest_first(&elders, |e| e.created_at)
            .into_iter()
            .filter(|e| e.approval.status == ApprovalStatus::Pending)
            .take(limit as usize)
            .collect())
    }
}

impl VolunteerRepository for InMemoryRegistryRepository {
    async fn count_issued(&self, bucket_prefix: &str) -> RegistryResult<u64> {
        let volunteers = self.volunteers.lock().await;
        Ok(volunteers
            .iter()
            .filter(|v| v.volunteer_number.to_string().starts_with(bucket_prefix))
            .count() as u64)
    }

    async fn insert(&self, volunteer: &Volunteer) -> RegistryResult<()> {
        let mut volunteers = self.volunteers.lock().await;
        if volunteers
            .iter()
            .any(|v| v.volunteer_number == volunteer.volunteer_number)
        {
            return Err(RegistryError::DuplicateRegistrationNumber(
                volunteer.volunteer_number.to_string(),
            ));
        }
        volunteers.push(volunteer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: VolunteerId) -> RegistryResult<Option<Volunteer>> {
        let volunteers = self.volunteers.lock().await;
        Ok(volunteers.iter().find(|v| v.id == id).cloned())
    }

    async fn find_by_number(&self, number: &str) -> RegistryResult<Option<Volunteer>> {
        let volunteers = self.volunteers.lock().await;
        Ok(volunteers
            .iter()
            .find(|v| v.volunteer_number.to_string() == number)
            .cloned())
    }

    async fn save_approval(&self, volunteer: &Volunteer) -> RegistryResult<()> {
        let mut volunteers = self.volunteers.lock().await;
        if let Some(stored) = volunteers.iter_mut().find(|v| v.id == volunteer.id) {
            stored.approval = volunteer.approval.clone();
            stored.updated_at = volunteer.updated_at;
        }
        Ok(())
    }

    async fn list(&self, query: &ListQuery) -> RegistryResult<Page<Volunteer>> {
        let volunteers = self.volunteers.lock().await;
        let needle = query.search.as_deref().map(str::to_lowercase);

        let matching: Vec<Volunteer> = newest_first(&volunteers, |v| v.created_at)
            .into_iter()
            .filter(|v| query.status.matches(v.approval.status))
            .filter(|v| match &needle {
                None => true,
                Some(n) => {
                    contains_ignore_case(&v.volunteer_number.to_string(), n)
                        || contains_ignore_case(&v.full_name, n)
                        || contains_ignore_case(v.email.as_str(), n)
                }
            })
            .collect();

        Ok(Page::from_vec(matching, query.page))
    }

    async fn status_counts(&self) -> RegistryResult<StatusCounts> {
        let volunteers = self.volunteers.lock().await;
        Ok(tally(volunteers.iter().map(|v| &v.approval)))
    }

    async fn recent_pending(&self, limit: u32) -> RegistryResult<Vec<Volunteer>> {
        let volunteers = self.volunteers.lock().await;
        Ok(newest_first(&volunteers, |v| v.created_at)
            .into_iter()
            .filter(|v| v.approval.status == ApprovalStatus::Pending)
            .take(limit as usize)
            .collect())
    }
}
