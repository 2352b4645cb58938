//! Register Elder Use Case
//!
//! Validates an elder registration, allocates its `VK` number and stores it.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Local, Utc};

use crate::application::config::RegistryConfig;
use crate::domain::entity::elder::{Elder, ElderApplication, ElderSubmission};
use crate::domain::repository::ElderRepository;
use crate::domain::value_object::registration_number::{
    RegistrationKind, RegistrationNumber, allocate, bucket_prefix,
};
use crate::error::{RegistryError, RegistryResult};

/// Result of a successful registration
#[derive(Debug, Clone)]
pub struct RegistrationReceipt {
    pub number: RegistrationNumber,
    pub message: String,
}

/// Register elder use case
pub struct RegisterElderUseCase<R>
where
    R: ElderRepository,
{
    repo: Arc<R>,
    config: Arc<RegistryConfig>,
}

impl<R> RegisterElderUseCase<R>
where
    R: ElderRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<RegistryConfig>) -> Self {
        Self { repo, config }
    }

    /// Register in the current local calendar year
    pub async fn execute(&self, submission: ElderSubmission) -> RegistryResult<RegistrationReceipt> {
        self.execute_at(submission, Local::now().year(), Utc::now())
            .await
    }

    /// Register as of `year` / `now`
    pub async fn execute_at(
        &self,
        submission: ElderSubmission,
        year: i32,
        now: DateTime<Utc>,
    ) -> RegistryResult<RegistrationReceipt> {
        let application = ElderApplication::validate(submission, self.config.elder_min_age)?;

        let kind = RegistrationKind::Elder;
        let prefix = bucket_prefix(kind, year);
        let attempts = self.config.effective_allocation_attempts();

        for attempt in 1..=attempts {
            let issued = self.repo.count_issued(&prefix).await?;
            let number = allocate(kind, year, issued);
            let elder = Elder::register(&application, number, now);

            match self.repo.insert(&elder).await {
                Ok(()) => {
                    tracing::info!(
                        registration_number = %number,
                        elder_id = %elder.id,
                        attempt,
                        "Elder registered"
                    );
                    return Ok(RegistrationReceipt {
                        number,
                        message: format!(
                            "Registration successful! Registration ID: {}. Please save this ID for future reference. We will review the application and contact you soon.",
                            number
                        ),
                    });
                }
                Err(RegistryError::DuplicateRegistrationNumber(taken)) => {
                    tracing::warn!(
                        registration_number = %taken,
                        attempt,
                        "Registration number taken concurrently, recounting"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(RegistryError::AllocationContention { kind, attempts })
    }
}
