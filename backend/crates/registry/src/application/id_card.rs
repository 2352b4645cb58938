//! ID Card Use Case
//!
//! Builds and renders the ID card of an approved registrant.

use std::sync::Arc;

use crate::application::config::RegistryConfig;
use crate::domain::id_card::{IdCard, IdCardRenderer};
use crate::domain::repository::{ElderRepository, VolunteerRepository};
use crate::domain::value_object::registration_number::{RegistrationKind, normalize_lookup};
use crate::error::{RegistryError, RegistryResult};

/// A rendered card, ready to download
#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// ID card use case
pub struct IdCardUseCase<E, V>
where
    E: ElderRepository,
    V: VolunteerRepository,
{
    elder_repo: Arc<E>,
    volunteer_repo: Arc<V>,
    renderer: Arc<dyn IdCardRenderer>,
    config: Arc<RegistryConfig>,
}

impl<E, V> IdCardUseCase<E, V>
where
    E: ElderRepository,
    V: VolunteerRepository,
{
    pub fn new(
        elder_repo: Arc<E>,
        volunteer_repo: Arc<V>,
        renderer: Arc<dyn IdCardRenderer>,
        config: Arc<RegistryConfig>,
    ) -> Self {
        Self {
            elder_repo,
            volunteer_repo,
            renderer,
            config,
        }
    }

    pub async fn volunteer(&self, raw_number: &str) -> RegistryResult<RenderedCard> {
        let volunteer = self
            .volunteer_repo
            .find_by_number(&normalize_lookup(raw_number))
            .await?
            .ok_or(RegistryError::VolunteerNotFound)?;

        if !volunteer.approval.is_approved() {
            return Err(RegistryError::NotApproved(RegistrationKind::Volunteer));
        }

        self.render(IdCard::for_volunteer(
            &volunteer,
            &self.config.organization_name,
        ))
    }

    pub async fn elder(&self, raw_number: &str) -> RegistryResult<RenderedCard> {
        let elder = self
            .elder_repo
            .find_by_number(&normalize_lookup(raw_number))
            .await?
            .ok_or(RegistryError::ElderNotFound)?;

        if !elder.approval.is_approved() {
            return Err(RegistryError::NotApproved(RegistrationKind::Elder));
        }

        self.render(IdCard::for_elder(&elder, &self.config.organization_name))
    }

    fn render(&self, card: IdCard) -> RegistryResult<RenderedCard> {
        let card = match &self.config.id_card_footer_note {
            Some(note) => card.with_footer_note(note),
            None => card,
        };

        let bytes = self.renderer.render(&card)?;

        tracing::info!(
            number = %card.number,
            size = bytes.len(),
            "ID card generated"
        );

        Ok(RenderedCard {
            file_name: card.file_name(),
            content_type: self.renderer.content_type(),
            bytes,
        })
    }
}
