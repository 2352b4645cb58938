//! Contact Inquiry Entity

use chrono::{DateTime, Utc};
use kernel::contact::{Email, required_text};
use kernel::id::InquiryId;

use crate::domain::entity::donation::{NAME_MAX_CHARS, PHONE_MAX_CHARS};
use crate::error::OutreachResult;

pub const SUBJECT_MAX_CHARS: usize = 200;

/// Raw contact form.
#[derive(Debug, Clone, Default)]
pub struct InquirySubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Inquiry {
    pub id: InquiryId,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub is_resolved: bool,
    pub created_at: DateTime<Utc>,
}

impl Inquiry {
    pub fn submit(submission: InquirySubmission, now: DateTime<Utc>) -> OutreachResult<Self> {
        Ok(Self {
            id: InquiryId::new(),
            name: required_text("Name", &submission.name, NAME_MAX_CHARS)?,
            email: Email::new(&submission.email)?,
            phone: required_text("Phone", &submission.phone, PHONE_MAX_CHARS)?,
            subject: required_text("Subject", &submission.subject, SUBJECT_MAX_CHARS)?,
            message: required_text("Message", &submission.message, usize::MAX)?,
            is_resolved: false,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit() {
        let inquiry = Inquiry::submit(
            InquirySubmission {
                name: "Asha".to_string(),
                email: "asha@example.org".to_string(),
                phone: "9876543210".to_string(),
                subject: "Visiting hours".to_string(),
                message: "Can we visit on Sunday?".to_string(),
            },
            Utc::now(),
        )
        .unwrap();
        assert!(!inquiry.is_resolved);

        let missing_subject = InquirySubmission {
            subject: String::new(),
            ..InquirySubmission::default()
        };
        assert!(Inquiry::submit(missing_subject, Utc::now()).is_err());
    }
}
