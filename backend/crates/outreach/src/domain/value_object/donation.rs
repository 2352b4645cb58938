//! Donation Type and Status

use serde::{Deserialize, Serialize};
use std::fmt;

/// What is being offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationType {
    Food,
    Clothes,
    Medicines,
    Money,
    Other,
}

impl DonationType {
    pub const ALL: [DonationType; 5] = [
        Self::Food,
        Self::Clothes,
        Self::Medicines,
        Self::Money,
        Self::Other,
    ];

    /// String code, also the stored column value
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Clothes => "clothes",
            Self::Medicines => "medicines",
            Self::Money => "money",
            Self::Other => "other",
        }
    }

    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Clothes => "Clothes",
            Self::Medicines => "Medicines",
            Self::Money => "Money",
            Self::Other => "Other",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl fmt::Display for DonationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Where a donation stands. Staff may move between any two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    #[default]
    Pending,
    Fulfilled,
    Cancelled,
}

impl DonationStatus {
    pub const ALL: [DonationStatus; 3] = [Self::Pending, Self::Fulfilled, Self::Cancelled];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fulfilled => "fulfilled",
            Self::Cancelled => "cancelled",
        }
    }

    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Fulfilled => "Fulfilled",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes() {
        for kind in DonationType::ALL {
            assert_eq!(DonationType::from_code(kind.code()), Some(kind));
        }
        assert_eq!(DonationType::from_code("Food"), None);
        assert_eq!(DonationType::Medicines.label(), "Medicines");
    }

    #[test]
    fn test_status_default_and_serde() {
        assert_eq!(DonationStatus::default(), DonationStatus::Pending);
        assert_eq!(
            serde_json::to_string(&DonationStatus::Fulfilled).unwrap(),
            "\"fulfilled\""
        );
        assert_eq!(DonationStatus::from_code("cancelled"), Some(DonationStatus::Cancelled));
    }
}
