//! Daily assignment entity model and DTOs.

use callsheet_core::types::{Day, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A daily assignment row: one talent entity on one shooting day,
/// optionally linked to the escort covering it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyAssignment {
    pub id: DbId,
    pub project_id: DbId,
    pub talent_id: DbId,
    pub day: Day,
    pub escort_assignment_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a talent-day slot. Keyed by `(talent_id, day)`;
/// a repeated upsert replaces the escort link.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertDailyAssignment {
    pub talent_id: DbId,
    pub day: Day,
    pub escort_assignment_id: Option<DbId>,
}
