//! Registry Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Registrations, approval workflow, numbering, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories, PDF rendering
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Registration numbers
//! Elders get `VK<year>-<seq>` and volunteers `VL<year>-<seq>`. The
//! sequence is one more than the number already issued in that bucket,
//! zero-padded to four digits. The number column is unique, so two
//! submissions racing for the same slot cannot both win: the loser
//! recounts and tries again a bounded number of times.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::RegistryConfig;
pub use error::{RegistryError, RegistryResult};
pub use infra::postgres::PgRegistryRepository;
pub use presentation::router::{RegistryRouters, registry_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::memory::InMemoryRegistryRepository;
    pub use crate::infra::postgres::PgRegistryRepository as RegistryStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
