//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the ID card model.

pub mod entity;
pub mod id_card;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{elder::Elder, volunteer::Volunteer};
pub use repository::{ElderRepository, VolunteerRepository};
