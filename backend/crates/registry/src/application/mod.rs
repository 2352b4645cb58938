//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod check_status;
pub mod config;
pub mod id_card;
pub mod list;
pub mod register_elder;
pub mod register_volunteer;
pub mod review;
pub mod stats;

pub use check_status::{CheckStatusUseCase, StatusReport};
pub use id_card::{IdCardUseCase, RenderedCard};
pub use list::{ListParams, ListRegistrationsUseCase};
pub use register_elder::{RegisterElderUseCase, RegistrationReceipt};
pub use register_volunteer::RegisterVolunteerUseCase;
pub use review::{ReviewDecision, ReviewUseCase};
pub use stats::{RegistryDashboard, RegistryOverview, RegistryStatsUseCase};
