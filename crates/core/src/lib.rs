//! Domain rules for break scheduling.
//!
//! This crate has no internal dependencies and no I/O, so the validation it
//! performs can be shared by the repository layer, the API and any tooling.

pub mod error;
pub mod roles;
pub mod scheduling;
pub mod staffing;
pub mod status;
pub mod types;
