//! Register Volunteer Use Case

use std::sync::Arc;

use chrono::{DateTime, Datelike, Local, Utc};

use crate::application::config::RegistryConfig;
use crate::application::register_elder::RegistrationReceipt;
use crate::domain::entity::volunteer::{Volunteer, VolunteerApplication, VolunteerSubmission};
use crate::domain::repository::VolunteerRepository;
use crate::domain::value_object::registration_number::{RegistrationKind, allocate, bucket_prefix};
use crate::error::{RegistryError, RegistryResult};

/// Register volunteer use case
pub struct RegisterVolunteerUseCase<R>
where
    R: VolunteerRepository,
{
    repo: Arc<R>,
    config: Arc<RegistryConfig>,
}

impl<R> RegisterVolunteerUseCase<R>
where
    R: VolunteerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<RegistryConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        submission: VolunteerSubmission,
    ) -> RegistryResult<RegistrationReceipt> {
        self.execute_at(submission, Local::now().year(), Utc::now())
            .await
    }

    pub async fn execute_at(
        &self,
        submission: VolunteerSubmission,
        year: i32,
        now: DateTime<Utc>,
    ) -> RegistryResult<RegistrationReceipt> {
        let application =
            VolunteerApplication::validate(submission, self.config.volunteer_min_age)?;

        let kind = RegistrationKind::Volunteer;
        let prefix = bucket_prefix(kind, year);
        let attempts = self.config.effective_allocation_attempts();

        for attempt in 1..=attempts {
            let issued = self.repo.count_issued(&prefix).await?;
            let number = allocate(kind, year, issued);
            let volunteer = Volunteer::register(&application, number, now);

            match self.repo.insert(&volunteer).await {
                Ok(()) => {
                    tracing::info!(
                        volunteer_number = %number,
                        volunteer_id = %volunteer.id,
                        attempt,
                        "Volunteer registered"
                    );
                    return Ok(RegistrationReceipt {
                        number,
                        message: format!(
                            "Registration successful! Your Volunteer ID is {}. We will review your application and contact you soon.",
                            number
                        ),
                    });
                }
                Err(RegistryError::DuplicateRegistrationNumber(taken)) => {
                    tracing::warn!(
                        volunteer_number = %taken,
                        attempt,
                        "Volunteer number taken concurrently, recounting"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(RegistryError::AllocationContention { kind, attempts })
    }
}
