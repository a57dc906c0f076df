//! The readiness engine wiring.
//!
//! `snapshot` loads a [`callsheet_core::readiness::ConfigurationSnapshot`]
//! from the database; `coordinator` owns invalidation, debounced
//! recomputation, and the optimistic echo.

pub mod coordinator;
pub mod snapshot;
