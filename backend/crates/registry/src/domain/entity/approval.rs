//! Approval State
//!
//! The review outcome shared by elder and volunteer registrations.

use chrono::{DateTime, Utc};

use crate::domain::value_object::approval_status::ApprovalStatus;
use crate::error::{RegistryError, RegistryResult};

/// Longest rejection reason accepted.
pub const REJECTION_REASON_MAX_CHARS: usize = 2000;

/// A non-blank reason for turning a registration down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionReason(String);

impl RejectionReason {
    /// Blank reasons and reasons over [`REJECTION_REASON_MAX_CHARS`] are
    /// refused, never cut short.
    pub fn new(raw: &str) -> RegistryResult<Self> {
        let reason = raw.trim();
        if reason.is_empty() {
            return Err(RegistryError::RejectionReasonRequired);
        }
        if reason.chars().count() > REJECTION_REASON_MAX_CHARS {
            return Err(RegistryError::Validation(format!(
                "Rejection reason must be at most {} characters",
                REJECTION_REASON_MAX_CHARS
            )));
        }
        Ok(Self(reason.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Review state of a registration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Approval {
    pub status: ApprovalStatus,
    pub approved_at: Option<DateTime<Utc>>,
    /// Name of the staff member who approved
    pub approved_by: Option<String>,
    /// Empty unless rejected
    pub rejection_reason: String,
}

impl Approval {
    pub fn approve(&mut self, staff: &str, now: DateTime<Utc>) {
        self.status = ApprovalStatus::Approved;
        self.approved_at = Some(now);
        self.approved_by = Some(staff.to_string());
        self.rejection_reason.clear();
    }

    pub fn reject(&mut self, reason: &RejectionReason) {
        self.status = ApprovalStatus::Rejected;
        self.rejection_reason = reason.as_str().to_string();
        self.approved_at = None;
        self.approved_by = None;
    }

    pub fn is_approved(&self) -> bool {
        self.status == ApprovalStatus::Approved
    }

    /// Rejection reason, only while rejected.
    pub fn visible_rejection_reason(&self) -> Option<&str> {
        (self.status == ApprovalStatus::Rejected && !self.rejection_reason.is_empty())
            .then_some(self.rejection_reason.as_str())
    }
}
