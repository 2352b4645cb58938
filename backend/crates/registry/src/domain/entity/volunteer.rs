//! Volunteer Entity

use chrono::{DateTime, Utc};
use kernel::contact::{Email, PhoneNumber, optional_text, required_text};
use kernel::id::VolunteerId;

use crate::domain::entity::approval::Approval;
use crate::domain::entity::elder::{NAME_MAX_CHARS, validate_age};
use crate::domain::value_object::attachment::{AttachmentRef, AttachmentSlot};
use crate::domain::value_object::registration_number::RegistrationNumber;
use crate::error::RegistryResult;

pub const AVAILABILITY_MAX_CHARS: usize = 200;

/// Raw volunteer registration form.
#[derive(Debug, Clone, Default)]
pub struct VolunteerSubmission {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub age: i64,
    pub profile_photo_filename: Option<String>,
    pub skills: String,
    pub availability: String,
    pub experience: Option<String>,
}

/// A validated submission still waiting for its volunteer number.
#[derive(Debug, Clone)]
pub struct VolunteerApplication {
    full_name: String,
    email: Email,
    phone: PhoneNumber,
    address: String,
    age: i32,
    profile_photo_filename: Option<String>,
    skills: String,
    availability: String,
    experience: String,
}

impl VolunteerApplication {
    pub fn validate(submission: VolunteerSubmission, min_age: i32) -> RegistryResult<Self> {
        Ok(Self {
            full_name: required_text("Full name", &submission.full_name, NAME_MAX_CHARS)?,
            email: Email::new(&submission.email)?,
            phone: PhoneNumber::new(&submission.phone_number)?,
            address: required_text("Address", &submission.address, usize::MAX)?,
            age: validate_age(submission.age, min_age)?,
            profile_photo_filename: submission
                .profile_photo_filename
                .filter(|name| !name.trim().is_empty()),
            skills: required_text("Skills", &submission.skills, usize::MAX)?,
            availability: required_text(
                "Availability",
                &submission.availability,
                AVAILABILITY_MAX_CHARS,
            )?,
            experience: optional_text(submission.experience.as_deref()),
        })
    }
}

/// Volunteer entity
#[derive(Debug, Clone)]
pub struct Volunteer {
    pub id: VolunteerId,
    pub volunteer_number: RegistrationNumber,
    pub full_name: String,
    pub email: Email,
    pub phone: PhoneNumber,
    pub address: String,
    pub age: i32,
    pub profile_photo: Option<AttachmentRef>,
    pub skills: String,
    pub availability: String,
    pub experience: String,
    pub approval: Approval,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Volunteer {
    pub fn register(
        application: &VolunteerApplication,
        number: RegistrationNumber,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: VolunteerId::new(),
            profile_photo: application.profile_photo_filename.as_deref().map(|name| {
                AttachmentRef::for_upload(AttachmentSlot::VolunteerPhoto, &number, name)
            }),
            volunteer_number: number,
            full_name: application.full_name.clone(),
            email: application.email.clone(),
            phone: application.phone.clone(),
            address: application.address.clone(),
            age: application.age,
            skills: application.skills.clone(),
            availability: application.availability.clone(),
            experience: application.experience.clone(),
            approval: Approval::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::registration_number::{RegistrationKind, allocate};
    use crate::error::RegistryError;

    fn submission() -> VolunteerSubmission {
        VolunteerSubmission {
            full_name: "Priya Sharma".to_string(),
            email: "Priya@Example.com".to_string(),
            phone_number: "9876543210".to_string(),
            address: "Lanka, Varanasi".to_string(),
            age: 24,
            profile_photo_filename: Some("priya.webp".to_string()),
            skills: "Nursing, reading aloud".to_string(),
            availability: "Weekends".to_string(),
            experience: None,
        }
    }

    #[test]
    fn test_register_volunteer() {
        let application = VolunteerApplication::validate(submission(), 18).unwrap();
        let volunteer = Volunteer::register(
            &application,
            allocate(RegistrationKind::Volunteer, 2025, 41),
            Utc::now(),
        );

        assert_eq!(volunteer.volunteer_number.to_string(), "VL2025-0042");
        assert_eq!(volunteer.email.as_str(), "priya@example.com");
        assert_eq!(
            volunteer.profile_photo.unwrap().as_str(),
            "volunteers/profile_photos/volunteer_VL2025-0042.webp"
        );
    }

    #[test]
    fn test_photo_is_optional() {
        let mut sub = submission();
        sub.profile_photo_filename = Some("  ".to_string());
        let application = VolunteerApplication::validate(sub, 18).unwrap();
        let volunteer = Volunteer::register(
            &application,
            allocate(RegistrationKind::Volunteer, 2025, 0),
            Utc::now(),
        );
        assert!(volunteer.profile_photo.is_none());
    }

    #[test]
    fn test_minors_and_missing_email_rejected() {
        let mut minor = submission();
        minor.age = 17;
        assert!(matches!(
            VolunteerApplication::validate(minor, 18),
            Err(RegistryError::Validation(_))
        ));

        let mut no_email = submission();
        no_email.email = String::new();
        assert!(VolunteerApplication::validate(no_email, 18).is_err());

        let mut no_phone = submission();
        no_phone.phone_number = String::new();
        assert!(VolunteerApplication::validate(no_phone, 18).is_err());
    }
}
