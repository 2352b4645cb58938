//! Infrastructure Layer

pub mod memory;
pub mod pdf;
pub mod postgres;
