//! Entity Module

pub mod approval;
pub mod elder;
pub mod volunteer;
