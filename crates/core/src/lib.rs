//! Callsheet domain logic.
//!
//! Pure types and evaluation rules for the staffing platform: project
//! lifecycle, staffing role categories, the talent roster, and the project
//! readiness engine. This crate has no database dependencies; everything
//! here operates on pre-loaded values passed in by the caller.

pub mod error;
pub mod project;
pub mod readiness;
pub mod roster;
pub mod staffing;
pub mod types;
