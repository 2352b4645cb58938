//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations that carry no charity vocabulary:
//! - Client address extraction for request logging
//! - Hashing and constant-time comparison
//! - The staff bearer-token guard in front of `/api/staff`

pub mod client;
pub mod crypto;
pub mod staff;
