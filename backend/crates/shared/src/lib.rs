//! Shared Kernel - vocabulary every bounded context agrees on
//!
//! This crate holds the pieces the registry and outreach contexts both speak:
//! - The unified error type and result alias
//! - Typed entity IDs
//! - Contact value objects (phone numbers, email addresses, bounded text)
//! - Pagination and search helpers
//!
//! Nothing here knows about elders, volunteers or donations.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod contact;
pub mod id;
pub mod page;
pub mod search;
