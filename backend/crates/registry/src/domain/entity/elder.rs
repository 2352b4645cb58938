//! Elder Entity
//!
//! An elder registered for care, together with the guardian who vouches for
//! them. The registration number is fixed at creation.

use chrono::{DateTime, Utc};
use kernel::contact::{PhoneNumber, optional_text, required_text};
use kernel::error::{app_error::OptionExt, kind::ErrorKind};
use kernel::id::ElderId;

use crate::domain::entity::approval::Approval;
use crate::domain::value_object::attachment::{AttachmentRef, AttachmentSlot};
use crate::domain::value_object::registration_number::RegistrationNumber;
use crate::error::{RegistryError, RegistryResult};

pub const NAME_MAX_CHARS: usize = 200;
pub const RELATIONSHIP_MAX_CHARS: usize = 100;
pub const DEFAULT_GUARDIAN_RELATIONSHIP: &str = "Son/Daughter";
pub const MAX_AGE: i32 = 130;

/// Raw elder registration form.
#[derive(Debug, Clone, Default)]
pub struct ElderSubmission {
    pub full_name: String,
    pub age: i64,
    pub address: String,
    pub phone_number: Option<String>,
    pub photo_filename: String,
    pub id_proof_filename: String,
    pub guardian_name: String,
    pub guardian_contact: String,
    pub guardian_relationship: Option<String>,
    pub health_conditions: Option<String>,
    pub special_requirements: Option<String>,
}

/// A validated submission still waiting for its registration number.
#[derive(Debug, Clone)]
pub struct ElderApplication {
    full_name: String,
    age: i32,
    address: String,
    phone: Option<PhoneNumber>,
    photo_filename: String,
    id_proof_filename: String,
    guardian_name: String,
    guardian_contact: PhoneNumber,
    guardian_relationship: String,
    health_conditions: String,
    special_requirements: String,
}

impl ElderApplication {
    pub fn validate(submission: ElderSubmission, min_age: i32) -> RegistryResult<Self> {
        let full_name = required_text("Full name", &submission.full_name, NAME_MAX_CHARS)?;
        let age = validate_age(submission.age, min_age)?;
        let address = required_text("Address", &submission.address, usize::MAX)?;
        let phone = PhoneNumber::optional(submission.phone_number.as_deref())?;

        if submission.photo_filename.trim().is_empty() {
            return Err(RegistryError::Validation("Photo is required".to_string()));
        }
        if submission.id_proof_filename.trim().is_empty() {
            return Err(RegistryError::Validation("ID proof is required".to_string()));
        }

        let guardian_name =
            required_text("Guardian name", &submission.guardian_name, NAME_MAX_CHARS)?;
        let guardian_contact = PhoneNumber::new(&submission.guardian_contact)?;
        let guardian_relationship = match submission.guardian_relationship.as_deref().map(str::trim)
        {
            None | Some("") => DEFAULT_GUARDIAN_RELATIONSHIP.to_string(),
            Some(value) => required_text("Guardian relationship", value, RELATIONSHIP_MAX_CHARS)?,
        };

        Ok(Self {
            full_name,
            age,
            address,
            phone,
            photo_filename: submission.photo_filename,
            id_proof_filename: submission.id_proof_filename,
            guardian_name,
            guardian_contact,
            guardian_relationship,
            health_conditions: optional_text(submission.health_conditions.as_deref()),
            special_requirements: optional_text(submission.special_requirements.as_deref()),
        })
    }
}

pub(crate) fn validate_age(age: i64, min_age: i32) -> RegistryResult<i32> {
    let age = i32::try_from(age)
        .ok()
        .filter(|a| (0..=MAX_AGE).contains(a))
        .ok_or_app_err(ErrorKind::BadRequest, "Enter a valid age.")?;
    if age < min_age {
        return Err(RegistryError::Validation(format!(
            "Age must be at least {}.",
            min_age
        )));
    }
    Ok(age)
}

/// Elder entity
#[derive(Debug, Clone)]
pub struct Elder {
    pub id: ElderId,
    pub registration_number: RegistrationNumber,
    pub full_name: String,
    pub age: i32,
    pub address: String,
    pub phone: Option<PhoneNumber>,
    pub photo: AttachmentRef,
    pub id_proof: AttachmentRef,
    pub guardian_name: String,
    pub guardian_contact: PhoneNumber,
    pub guardian_relationship: String,
    pub health_conditions: String,
    pub special_requirements: String,
    pub approval: Approval,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Elder {
    /// New pending elder holding `number`. Attachment paths follow the number.
    pub fn register(
        application: &ElderApplication,
        number: RegistrationNumber,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ElderId::new(),
            photo: AttachmentRef::for_upload(
                AttachmentSlot::ElderPhoto,
                &number,
                &application.photo_filename,
            ),
            id_proof: AttachmentRef::for_upload(
                AttachmentSlot::ElderIdProof,
                &number,
                &application.id_proof_filename,
            ),
            registration_number: number,
            full_name: application.full_name.clone(),
            age: application.age,
            address: application.address.clone(),
            phone: application.phone.clone(),
            guardian_name: application.guardian_name.clone(),
            guardian_contact: application.guardian_contact.clone(),
            guardian_relationship: application.guardian_relationship.clone(),
            health_conditions: application.health_conditions.clone(),
            special_requirements: application.special_requirements.clone(),
            approval: Approval::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Phone printed on the ID card: the elder's own, else the guardian's.
    pub fn contact_phone(&self) -> &PhoneNumber {
        self.phone.as_ref().unwrap_or(&self.guardian_contact)
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
