//! Staff Listing Use Case

use std::sync::Arc;

use kernel::id::{ElderId, VolunteerId};
use kernel::page::{Page, PageRequest};

use crate::application::config::RegistryConfig;
use crate::domain::entity::{elder::Elder, volunteer::Volunteer};
use crate::domain::repository::{ElderRepository, ListQuery, VolunteerRepository};
use crate::domain::value_object::approval_status::StatusFilter;
use crate::error::{RegistryError, RegistryResult};

/// Raw list parameters as they arrive from the query string
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// List registrations use case
pub struct ListRegistrationsUseCase<E, V>
where
    E: ElderRepository,
    V: VolunteerRepository,
{
    elder_repo: Arc<E>,
    volunteer_repo: Arc<V>,
    config: Arc<RegistryConfig>,
}

impl<E, V> ListRegistrationsUseCase<E, V>
where
    E: ElderRepository,
    V: VolunteerRepository,
{
    pub fn new(elder_repo: Arc<E>, volunteer_repo: Arc<V>, config: Arc<RegistryConfig>) -> Self {
        Self {
            elder_repo,
            volunteer_repo,
            config,
        }
    }

    fn query(&self, params: &ListParams) -> ListQuery {
        ListQuery::new(
            StatusFilter::parse(params.status.as_deref()),
            params.search.as_deref(),
            PageRequest::parse(params.page.as_deref(), self.config.staff_page_size),
        )
    }

    pub async fn elders(&self, params: &ListParams) -> RegistryResult<Page<Elder>> {
        self.elder_repo.list(&self.query(params)).await
    }

    pub async fn volunteers(&self, params: &ListParams) -> RegistryResult<Page<Volunteer>> {
        self.volunteer_repo.list(&self.query(params)).await
    }

    pub async fn elder(&self, id: ElderId) -> RegistryResult<Elder> {
        self.elder_repo
            .find_by_id(id)
            .await?
            .ok_or(RegistryError::RecordNotFound)
    }

    pub async fn volunteer(&self, id: VolunteerId) -> RegistryResult<Volunteer> {
        self.volunteer_repo
            .find_by_id(id)
            .await?
            .ok_or(RegistryError::RecordNotFound)
    }
}
