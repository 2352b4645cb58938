//! Approval Status
//!
//! Every registration starts `pending`; staff move it to `approved` or
//! `rejected`. Staff may revisit a decision, so there is no terminal state.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub const ALL: [ApprovalStatus; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// String code, also the stored column value
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// `?status=` filter on staff lists. Anything unrecognised means all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApprovalStatus),
}

impl StatusFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .and_then(ApprovalStatus::from_code)
            .map(Self::Only)
            .unwrap_or_default()
    }

    pub fn matches(&self, status: ApprovalStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }

    pub fn status(&self) -> Option<ApprovalStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(*status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for status in ApprovalStatus::ALL {
            assert_eq!(ApprovalStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(ApprovalStatus::from_code("archived"), None);
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(ApprovalStatus::default(), ApprovalStatus::Pending);
    }

    #[test]
    fn test_status_filter() {
        assert_eq!(StatusFilter::parse(None), StatusFilter::All);
        assert_eq!(StatusFilter::parse(Some("all")), StatusFilter::All);
        assert_eq!(StatusFilter::parse(Some("bogus")), StatusFilter::All);
        let approved = StatusFilter::parse(Some("approved"));
        assert!(approved.matches(ApprovalStatus::Approved));
        assert!(!approved.matches(ApprovalStatus::Pending));
        assert!(StatusFilter::All.matches(ApprovalStatus::Rejected));
    }
}
