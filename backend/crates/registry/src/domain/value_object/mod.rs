//! Value Object Module

pub mod approval_status;
pub mod attachment;
pub mod registration_number;
