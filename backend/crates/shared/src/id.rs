//! Common ID Types
//!
//! Type-safe internal ID wrappers for domain records. These are the primary
//! keys staff URLs use; the human-readable registration numbers live in the
//! registry crate.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// ```
/// use kernel::id::{ElderId, VolunteerId};
///
/// let elder: ElderId = ElderId::new();
/// let volunteer: VolunteerId = VolunteerId::from_uuid(*elder.as_uuid());
/// // same UUID, different types: they cannot be compared or swapped
/// assert_eq!(elder.as_uuid(), volunteer.as_uuid());
/// ```
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// New random ID (UUID v4)
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    pub fn into_uuid(self) -> Uuid {
        self.value
    }
}

// Manual impls so markers need not implement anything themselves.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self::from_uuid)
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    pub struct Elder;
    pub struct Volunteer;
    pub struct Donation;
    pub struct Inquiry;
    pub struct Testimonial;
}

pub type ElderId = Id<markers::Elder>;
pub type VolunteerId = Id<markers::Volunteer>;
pub type DonationId = Id<markers::Donation>;
pub type InquiryId = Id<markers::Inquiry>;
pub type TestimonialId = Id<markers::Testimonial>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_v4_and_distinct() {
        let a = DonationId::new();
        let b = DonationId::new();
        assert_ne!(a, b);
        assert_eq!(a.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_parse_and_display() {
        let raw = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        let id: ElderId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
        assert!("not-a-uuid".parse::<ElderId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = InquiryId::from_uuid(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""00000000-0000-0000-0000-000000000000""#);
        let back: InquiryId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
