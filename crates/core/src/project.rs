//! Project lifecycle rules.
//!
//! Defines the project status enumeration, the forward-only transition
//! rules between lifecycle stages, and date-range arithmetic used by the
//! readiness engine to size the daily assignment grid.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Day;

// ---------------------------------------------------------------------------
// Project status
// ---------------------------------------------------------------------------

/// Valid project status strings (stored in the `projects.status` column).
pub const STATUS_PREP: &str = "prep";
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_COMPLETE: &str = "complete";

/// All valid project status strings.
pub const VALID_PROJECT_STATUSES: &[&str] = &[STATUS_PREP, STATUS_ACTIVE, STATUS_COMPLETE];

/// Lifecycle stage of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Prep,
    Active,
    Complete,
}

impl ProjectStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_PREP => Ok(Self::Prep),
            STATUS_ACTIVE => Ok(Self::Active),
            STATUS_COMPLETE => Ok(Self::Complete),
            _ => Err(CoreError::Validation(format!(
                "Invalid project status '{s}'. Must be one of: {}",
                VALID_PROJECT_STATUSES.join(", ")
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prep => STATUS_PREP,
            Self::Active => STATUS_ACTIVE,
            Self::Complete => STATUS_COMPLETE,
        }
    }
}

/// Validate a project status transition.
///
/// Transitions are forward-only: `prep -> active -> complete`. Skipping a
/// stage or moving backwards is rejected.
pub fn validate_status_transition(
    current: ProjectStatus,
    next: ProjectStatus,
) -> Result<(), CoreError> {
    let valid = matches!(
        (current, next),
        (ProjectStatus::Prep, ProjectStatus::Active)
            | (ProjectStatus::Active, ProjectStatus::Complete)
    );
    if !valid {
        return Err(CoreError::Conflict(format!(
            "Cannot transition project from '{}' to '{}'",
            current.as_str(),
            next.as_str()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Date range
// ---------------------------------------------------------------------------

/// Validate a project date range (`end_date` must not precede `start_date`).
pub fn validate_date_range(start: Day, end: Day) -> Result<(), CoreError> {
    if end < start {
        return Err(CoreError::Validation(format!(
            "end_date {end} precedes start_date {start}"
        )));
    }
    Ok(())
}

/// Number of shooting days in a project, inclusive of both endpoints.
///
/// A one-day project (start == end) has a duration of 1. The daily
/// assignment grid has one slot per talent entity per shooting day.
pub fn duration_days(start: Day, end: Day) -> Result<i64, CoreError> {
    validate_date_range(start, end)?;
    Ok((end - start).num_days() + 1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
