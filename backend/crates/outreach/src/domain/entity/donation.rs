//! Donation Entity

use chrono::{DateTime, Utc};
use kernel::contact::{Email, optional_text, required_text};
use kernel::id::DonationId;

use crate::domain::value_object::donation::{DonationStatus, DonationType};
use crate::error::{OutreachError, OutreachResult};

pub const NAME_MAX_CHARS: usize = 200;
/// Phone is kept as typed, up to this many characters
pub const PHONE_MAX_CHARS: usize = 17;

/// Raw donation form.
#[derive(Debug, Clone, Default)]
pub struct DonationSubmission {
    pub donor_name: String,
    pub donor_email: String,
    pub donor_phone: String,
    pub donation_type: String,
    pub description: String,
    pub message: Option<String>,
}

/// Donation entity
#[derive(Debug, Clone)]
pub struct Donation {
    pub id: DonationId,
    pub donor_name: String,
    pub donor_email: Email,
    pub donor_phone: String,
    pub donation_type: DonationType,
    pub description: String,
    pub message: String,
    pub status: DonationStatus,
    pub fulfilled_at: Option<DateTime<Utc>>,
    /// Staff member who marked it fulfilled
    pub fulfilled_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Donation {
    /// Validate a public submission into a new pending donation
    pub fn submit(submission: DonationSubmission, now: DateTime<Utc>) -> OutreachResult<Self> {
        let donation_type = DonationType::from_code(submission.donation_type.trim())
            .ok_or_else(|| OutreachError::Validation("Select a valid donation type.".to_string()))?;

        Ok(Self {
            id: DonationId::new(),
            donor_name: required_text("Donor name", &submission.donor_name, NAME_MAX_CHARS)?,
            donor_email: Email::new(&submission.donor_email)?,
            donor_phone: required_text("Phone", &submission.donor_phone, PHONE_MAX_CHARS)?,
            donation_type,
            description: required_text("Description", &submission.description, usize::MAX)?,
            message: optional_text(submission.message.as_deref()),
            status: DonationStatus::Pending,
            fulfilled_at: None,
            fulfilled_by: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn fulfill(&mut self, staff: &str, now: DateTime<Utc>) {
        self.status = DonationStatus::Fulfilled;
        self.fulfilled_at = Some(now);
        self.fulfilled_by = Some(staff.to_string());
        self.updated_at = now;
    }

    pub fn cancel(&mut self, now: DateTime<Utc>) {
        self.status = DonationStatus::Cancelled;
        self.fulfilled_at = None;
        self.fulfilled_by = None;
        self.updated_at = now;
    }

    /// Back to pending
    pub fn reopen(&mut self, now: DateTime<Utc>) {
        self.status = DonationStatus::Pending;
        self.fulfilled_at = None;
        self.fulfilled_by = None;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> DonationSubmission {
        DonationSubmission {
            donor_name: " Ramesh Gupta ".to_string(),
            donor_email: "Ramesh@Example.org".to_string(),
            donor_phone: "+91 98765 43210".to_string(),
            donation_type: "clothes".to_string(),
            description: "Two boxes of winter blankets".to_string(),
            message: None,
        }
    }

    #[test]
    fn test_submit_normalises_fields() {
        let donation = Donation::submit(submission(), Utc::now()).unwrap();
        assert_eq!(donation.donor_name, "Ramesh Gupta");
        assert_eq!(donation.donor_email.as_str(), "ramesh@example.org");
        assert_eq!(donation.donation_type, DonationType::Clothes);
        assert_eq!(donation.status, DonationStatus::Pending);
        assert_eq!(donation.message, "");
    }

    #[test]
    fn test_submit_rejects_bad_input() {
        let mut bad_type = submission();
        bad_type.donation_type = "furniture".to_string();
        assert!(matches!(
            Donation::submit(bad_type, Utc::now()),
            Err(OutreachError::Validation(_))
        ));

        let mut long_phone = submission();
        long_phone.donor_phone = "+91 98765 43210 ext 5".to_string();
        assert!(Donation::submit(long_phone, Utc::now()).is_err());

        let mut no_description = submission();
        no_description.description = "   ".to_string();
        assert!(Donation::submit(no_description, Utc::now()).is_err());
    }

    #[test]
    fn test_transitions() {
        let mut donation = Donation::submit(submission(), Utc::now()).unwrap();
        let now = Utc::now();

        donation.fulfill("meena", now);
        assert_eq!(donation.status, DonationStatus::Fulfilled);
        assert_eq!(donation.fulfilled_by.as_deref(), Some("meena"));
        assert_eq!(donation.fulfilled_at, Some(now));

        donation.reopen(now);
        assert_eq!(donation.status, DonationStatus::Pending);
        assert!(donation.fulfilled_at.is_none());
        assert!(donation.fulfilled_by.is_none());

        donation.fulfill("meena", now);
        donation.cancel(now);
        assert_eq!(donation.status, DonationStatus::Cancelled);
        assert!(donation.fulfilled_by.is_none());
    }
}
