//! Domain Layer
//!
//! Donations, contact inquiries and testimonials.

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::{donation::Donation, inquiry::Inquiry, testimonial::Testimonial};
pub use repository::{DonationRepository, InquiryRepository, TestimonialRepository};
