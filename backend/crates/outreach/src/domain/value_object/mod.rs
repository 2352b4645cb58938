//! Value Objects

pub mod donation;
pub mod rating;
pub mod resolution;
