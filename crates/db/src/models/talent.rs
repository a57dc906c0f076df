//! Talent roster entity model and DTOs.

use callsheet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A talent roster row. Both individuals and groups count once toward
/// the roster size.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TalentEntry {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub kind: String,
    pub created_at: Timestamp,
}

/// DTO for adding a talent entry to the roster.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTalentEntry {
    pub name: String,
    /// Defaults to `individual` if omitted.
    pub kind: Option<String>,
}
