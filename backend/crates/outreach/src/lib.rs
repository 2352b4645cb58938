//! Outreach Backend Module
//!
//! Everything the public site collects besides registrations: donation
//! offers, contact inquiries and the testimonials shown on the home page.
//!
//! Clean Architecture structure:
//! - `domain/` - Donations, inquiries, testimonials, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::OutreachConfig;
pub use error::{OutreachError, OutreachResult};
pub use infra::postgres::PgOutreachRepository;
pub use presentation::router::{OutreachRouters, outreach_router};

pub mod store {
    pub use crate::infra::memory::InMemoryOutreachRepository;
    pub use crate::infra::postgres::PgOutreachRepository as OutreachStore;
}

#[cfg(test)]
mod tests;
