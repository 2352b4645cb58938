//! Testimonial Rating

use kernel::error::{app_error::OptionExt, kind::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::error::OutreachResult;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Star rating from 1 to 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Default for Rating {
    fn default() -> Self {
        Self(MAX_RATING)
    }
}

impl Rating {
    pub fn new(value: i64) -> OutreachResult<Self> {
        let rating = u8::try_from(value)
            .ok()
            .filter(|v| (MIN_RATING..=MAX_RATING).contains(v))
            .map(Self)
            .ok_or_app_err(
                ErrorKind::BadRequest,
                format!("Rating must be between {} and {}.", MIN_RATING, MAX_RATING),
            )?;
        Ok(rating)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OutreachError;

    #[test]
    fn test_bounds() {
        assert_eq!(Rating::new(1).unwrap().value(), 1);
        assert_eq!(Rating::new(5).unwrap().value(), 5);
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert!(Rating::new(-3).is_err());
        assert_eq!(Rating::default().value(), 5);
    }

    #[test]
    fn test_out_of_range_is_a_validation_error() {
        let err = Rating::new(6).unwrap_err();
        assert!(matches!(
            err,
            OutreachError::Validation(ref msg) if msg == "Rating must be between 1 and 5."
        ));
        assert_eq!(err.status_code(), 400);
    }
}
