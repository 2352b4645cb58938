//! Testimonial Entity

use chrono::{DateTime, Utc};
use kernel::contact::required_text;
use kernel::id::TestimonialId;

use crate::domain::entity::donation::NAME_MAX_CHARS;
use crate::domain::value_object::rating::Rating;
use crate::error::OutreachResult;

pub const RELATIONSHIP_MAX_CHARS: usize = 100;

/// Staff-entered testimonial.
#[derive(Debug, Clone, Default)]
pub struct TestimonialSubmission {
    pub name: String,
    /// e.g. "Son of Mr. X", "Volunteer"
    pub relationship: String,
    /// Defaults to 5 stars
    pub rating: Option<i64>,
    pub comment: String,
    /// Defaults to shown
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    pub relationship: String,
    pub rating: Rating,
    pub comment: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Testimonial {
    pub fn create(submission: TestimonialSubmission, now: DateTime<Utc>) -> OutreachResult<Self> {
        let rating = match submission.rating {
            Some(value) => Rating::new(value)?,
            None => Rating::default(),
        };

        Ok(Self {
            id: TestimonialId::new(),
            name: required_text("Name", &submission.name, NAME_MAX_CHARS)?,
            relationship: required_text(
                "Relationship",
                &submission.relationship,
                RELATIONSHIP_MAX_CHARS,
            )?,
            rating,
            comment: required_text("Comment", &submission.comment, usize::MAX)?,
            is_active: submission.is_active.unwrap_or(true),
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> TestimonialSubmission {
        TestimonialSubmission {
            name: "Neha Verma".to_string(),
            relationship: "Daughter of Mrs. Verma".to_string(),
            rating: None,
            comment: "The staff treat my mother like family.".to_string(),
            is_active: None,
        }
    }

    #[test]
    fn test_defaults() {
        let testimonial = Testimonial::create(submission(), Utc::now()).unwrap();
        assert_eq!(testimonial.rating.value(), 5);
        assert!(testimonial.is_active);
    }

    #[test]
    fn test_rating_out_of_range() {
        let mut sub = submission();
        sub.rating = Some(7);
        assert!(Testimonial::create(sub, Utc::now()).is_err());
    }
}
