//! Entities

pub mod donation;
pub mod inquiry;
pub mod testimonial;
