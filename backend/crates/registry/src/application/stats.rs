//! Registry Statistics
//!
//! Figures for the public overview and the staff dashboard.

use std::sync::Arc;

use crate::application::config::RegistryConfig;
use crate::domain::entity::{elder::Elder, volunteer::Volunteer};
use crate::domain::repository::{ElderRepository, StatusCounts, VolunteerRepository};
use crate::error::RegistryResult;

/// Public figures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryOverview {
    pub total_elders: u64,
    pub approved_elders: u64,
    /// Approved volunteers
    pub active_volunteers: u64,
}

/// Staff dashboard figures
#[derive(Debug, Clone)]
pub struct RegistryDashboard {
    pub elders: StatusCounts,
    pub volunteers: StatusCounts,
    pub recent_pending_elders: Vec<Elder>,
    pub recent_pending_volunteers: Vec<Volunteer>,
}

pub struct RegistryStatsUseCase<E, V>
where
    E: ElderRepository,
    V: VolunteerRepository,
{
    elder_repo: Arc<E>,
    volunteer_repo: Arc<V>,
    config: Arc<RegistryConfig>,
}

impl<E, V> RegistryStatsUseCase<E, V>
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

    pub async fn overview(&self) -> RegistryResult<RegistryOverview> {
        let elders = self.elder_repo.status_counts().await?;
        let volunteers = self.volunteer_repo.status_counts().await?;

        Ok(RegistryOverview {
            total_elders: elders.total,
            approved_elders: elders.approved,
            active_volunteers: volunteers.approved,
        })
    }

    pub async fn dashboard(&self) -> RegistryResult<RegistryDashboard> {
        let limit = self.config.dashboard_recent_limit;

        Ok(RegistryDashboard {
            elders: self.elder_repo.status_counts().await?,
            volunteers: self.volunteer_repo.status_counts().await?,
            recent_pending_elders: self.elder_repo.recent_pending(limit).await?,
            recent_pending_volunteers: self.volunteer_repo.recent_pending(limit).await?,
        })
    }
}
