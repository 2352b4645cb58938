//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

pub use handlers::OutreachAppState;
pub use router::{OutreachRouters, outreach_router, outreach_router_generic};
