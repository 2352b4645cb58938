//! Contact Value Objects
//!
//! Phone numbers, email addresses and the bounded free-text fields every
//! intake form shares. Constructors normalise (trim, lowercase where it
//! matters) and reject with a 400 `AppError`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::app_error::{AppError, AppResult};

/// Maximum email length (RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?1?\d{9,15}$").expect("phone pattern is valid"));

const PHONE_FORMAT_MESSAGE: &str =
    "Phone number must be entered in the format: '+999999999'. Up to 15 digits allowed.";

// ============================================================================
// PhoneNumber
// ============================================================================

/// Phone number: optional `+`, optional leading `1`, then 9 to 15 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(AppError::bad_request("Phone number is required"));
        }
        if !PHONE_PATTERN.is_match(raw) {
            return Err(AppError::bad_request(PHONE_FORMAT_MESSAGE));
        }
        Ok(Self(raw.to_string()))
    }

    /// Blank input means "not provided".
    pub fn optional(raw: Option<&str>) -> AppResult<Option<Self>> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Self::new(value).map(Some),
        }
    }

    /// Rehydrate a stored value.
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Email
// ============================================================================

/// Email address, lowercased. Basic shape check only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let email = raw.as_ref().trim().to_lowercase();

        if email.is_empty() {
            return Err(AppError::bad_request("Email address is required"));
        }
        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }
        if !Self::is_valid_format(&email) {
            return Err(AppError::bad_request("Enter a valid email address."));
        }

        Ok(Self(email))
    }

    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if local.is_empty() || local.len() > 64 || domain.contains('@') {
            return false;
        }
        if !domain.contains('.') {
            return false;
        }
        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }
        !(domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Free text
// ============================================================================

/// Trimmed, non-empty, at most `max_chars` characters.
pub fn required_text(field: &'static str, raw: &str, max_chars: usize) -> AppResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::bad_request(format!("{} is required", field)));
    }
    if value.chars().count() > max_chars {
        return Err(AppError::bad_request(format!(
            "{} must be at most {} characters",
            field, max_chars
        )));
    }
    Ok(value.to_string())
}

/// Trimmed free text; absent becomes empty.
pub fn optional_text(raw: Option<&str>) -> String {
    raw.map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_accepts_documented_shapes() {
        assert!(PhoneNumber::new("+919876543210").is_ok());
        assert!(PhoneNumber::new("987654321").is_ok());
        assert!(PhoneNumber::new("  +1234567890123  ").is_ok());
    }

    #[test]
    fn test_phone_rejects_bad_shapes() {
        assert!(PhoneNumber::new("12345678").is_err()); // 8 digits
        assert!(PhoneNumber::new("+91 98765 43210").is_err());
        assert!(PhoneNumber::new("98765-43210").is_err());
        assert!(PhoneNumber::new("").is_err());
        let err = PhoneNumber::new("call me").unwrap_err();
        assert!(err.message().contains("+999999999"));
    }

    #[test]
    fn test_optional_phone() {
        assert_eq!(PhoneNumber::optional(None).unwrap(), None);
        assert_eq!(PhoneNumber::optional(Some("   ")).unwrap(), None);
        assert!(PhoneNumber::optional(Some("+919876543210")).unwrap().is_some());
        assert!(PhoneNumber::optional(Some("abc")).is_err());
    }

    #[test]
    fn test_email_normalises_and_validates() {
        let email = Email::new("  Donor@Example.ORG ").unwrap();
        assert_eq!(email.as_str(), "donor@example.org");
        assert!(Email::new("").is_err());
        assert!(Email::new("no-at-sign.org").is_err());
        assert!(Email::new("a@@b.org").is_err());
        assert!(Email::new("a@localhost").is_err());
        assert!(Email::new("a@-bad.org").is_err());
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("Full name", "  Asha  ", 200).unwrap(), "Asha");
        assert!(required_text("Full name", "   ", 200).is_err());
        let long = "x".repeat(201);
        let err = required_text("Full name", &long, 200).unwrap_err();
        assert!(err.message().contains("200"));
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(None), "");
        assert_eq!(optional_text(Some("  diabetic ")), "diabetic");
    }
}
