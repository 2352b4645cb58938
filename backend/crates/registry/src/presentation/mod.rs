//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

pub use handlers::RegistryAppState;
pub use router::{RegistryRouters, registry_router, registry_router_generic};
