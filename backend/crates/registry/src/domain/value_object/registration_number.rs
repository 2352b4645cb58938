//! Registration Numbers
//!
//! Human-readable identifiers handed to elders and volunteers when their
//! registration is first stored: `<PREFIX><YEAR>-<SEQ>`, e.g. `VK2025-0007`.
//!
//! - PREFIX is `VK` for elders and `VL` for volunteers.
//! - YEAR is the calendar year at creation time.
//! - SEQ counts registrations of that kind within that year, starting at 1,
//!   zero-padded to four digits. It widens past 9999 rather than truncating.
//!
//! A (PREFIX, YEAR) pair is a *bucket*. Within a bucket SEQ values are
//! exactly `1..=N`. Numbers are never reassigned or reused.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum width of the sequence segment.
pub const SEQUENCE_WIDTH: usize = 4;

// ============================================================================
// RegistrationKind
// ============================================================================

/// Which kind of registrant a number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationKind {
    Elder,
    Volunteer,
}

impl RegistrationKind {
    #[inline]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Elder => "VK",
            Self::Volunteer => "VL",
        }
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Elder => "elder",
            Self::Volunteer => "volunteer",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "VK" => Some(Self::Elder),
            "VL" => Some(Self::Volunteer),
            _ => None,
        }
    }
}

impl fmt::Display for RegistrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Allocation
// ============================================================================

/// The `PREFIX + YEAR + "-"` string every number in a bucket starts with.
///
/// Stores count issued numbers with `LIKE '<bucket_prefix>%'`.
pub fn bucket_prefix(kind: RegistrationKind, year: i32) -> String {
    format!("{}{}-", kind.prefix(), year)
}

/// Number for the next registration in a bucket that already holds
/// `issued` numbers.
///
/// Pure: the caller supplies the count and must persist the result under a
/// unique constraint, recounting if another registration won the race.
pub fn allocate(kind: RegistrationKind, year: i32, issued: u64) -> RegistrationNumber {
    RegistrationNumber {
        kind,
        year,
        sequence: issued + 1,
    }
}

// ============================================================================
// RegistrationNumber
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a registration number")]
pub struct InvalidRegistrationNumber(pub String);

/// A parsed registration number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationNumber {
    kind: RegistrationKind,
    year: i32,
    sequence: u64,
}

impl RegistrationNumber {
    pub fn kind(&self) -> RegistrationKind {
        self.kind
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Whether this number falls in the bucket for (`kind`, `year`).
    pub fn in_bucket(&self, kind: RegistrationKind, year: i32) -> bool {
        self.kind == kind && self.year == year
    }
}

impl fmt::Display for RegistrationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}-{:0width$}",
            self.kind.prefix(),
            self.year,
            self.sequence,
            width = SEQUENCE_WIDTH
        )
    }
}

impl FromStr for RegistrationNumber {
    type Err = InvalidRegistrationNumber;

    /// Strict parse of the canonical form. Lookups that accept user input
    /// should normalise case first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidRegistrationNumber(s.to_string());

        let (head, seq) = s.split_once('-').ok_or_else(invalid)?;
        if head.len() != 6 || !head.is_ascii() {
            return Err(invalid());
        }
        let (prefix, year) = head.split_at(2);
        let kind = RegistrationKind::from_prefix(prefix).ok_or_else(invalid)?;

        if !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;

        if seq.len() < SEQUENCE_WIDTH || !seq.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let sequence: u64 = seq.parse().map_err(|_| invalid())?;
        if sequence == 0 {
            return Err(invalid());
        }

        let number = Self {
            kind,
            year,
            sequence,
        };
        // Reject non-canonical padding such as `VK2025-00001`
        if number.to_string() != s {
            return Err(invalid());
        }
        Ok(number)
    }
}

impl Serialize for RegistrationNumber {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RegistrationNumber {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Normalise a number typed by a member of the public: trimmed, uppercased.
pub fn normalize_lookup(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_elder_of_year() {
        let number = allocate(RegistrationKind::Elder, 2025, 0);
        assert_eq!(number.to_string(), "VK2025-0001");
    }

    #[test]
    fn test_forty_second_volunteer() {
        let number = allocate(RegistrationKind::Volunteer, 2025, 41);
        assert_eq!(number.to_string(), "VL2025-0042");
        assert_eq!(number.sequence(), 42);
    }

    #[test]
    fn test_sequence_widens_past_four_digits() {
        assert_eq!(
            allocate(RegistrationKind::Elder, 2025, 9998).to_string(),
            "VK2025-9999"
        );
        assert_eq!(
            allocate(RegistrationKind::Elder, 2025, 9999).to_string(),
            "VK2025-10000"
        );
        assert_eq!(
            allocate(RegistrationKind::Volunteer, 2025, 123_455).to_string(),
            "VL2025-123456"
        );
    }

    #[test]
    fn test_buckets_are_distinct() {
        let elder_2025 = allocate(RegistrationKind::Elder, 2025, 0);
        let elder_2026 = allocate(RegistrationKind::Elder, 2026, 0);
        let volunteer_2025 = allocate(RegistrationKind::Volunteer, 2025, 0);

        assert_ne!(elder_2025.to_string(), elder_2026.to_string());
        assert_ne!(elder_2025.to_string(), volunteer_2025.to_string());
        assert!(elder_2025.in_bucket(RegistrationKind::Elder, 2025));
        assert!(!elder_2026.in_bucket(RegistrationKind::Elder, 2025));
    }

    #[test]
    fn test_bucket_prefix() {
        assert_eq!(bucket_prefix(RegistrationKind::Elder, 2025), "VK2025-");
        assert_eq!(bucket_prefix(RegistrationKind::Volunteer, 2031), "VL2031-");

        let number = allocate(RegistrationKind::Volunteer, 2031, 6);
        assert!(
            number
                .to_string()
                .starts_with(&bucket_prefix(RegistrationKind::Volunteer, 2031))
        );
    }

    #[test]
    fn test_parse_canonical() {
        let number: RegistrationNumber = "VL2024-0012".parse().unwrap();
        assert_eq!(number.kind(), RegistrationKind::Volunteer);
        assert_eq!(number.year(), 2024);
        assert_eq!(number.sequence(), 12);

        let wide: RegistrationNumber = "VK2025-10000".parse().unwrap();
        assert_eq!(wide.sequence(), 10_000);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in [
            "",
            "VK2025",
            "VX2025-0001",
            "vk2025-0001",
            "VK25-0001",
            "VK2025-001",
            "VK2025-0000",
            "VK2025-00001",
            "VK2025-00a1",
        ] {
            assert!(raw.parse::<RegistrationNumber>().is_err(), "{raw}");
        }
    }

    #[test]
    fn test_normalize_lookup() {
        assert_eq!(normalize_lookup("  vk2025-0001 "), "VK2025-0001");
    }

    #[test]
    fn test_serde_as_string() {
        let number = allocate(RegistrationKind::Elder, 2025, 6);
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"VK2025-0007\"");
        let back: RegistrationNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, number);
    }
}
