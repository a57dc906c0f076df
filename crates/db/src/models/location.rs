//! Location entity model and DTOs.

use callsheet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A location row from the `locations` table.
///
/// Rows with `is_default = true` are the seeded baseline every project
/// starts with; the readiness engine treats a project with only default
/// locations as unconfigured.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub is_default: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a custom location.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocation {
    pub name: String,
    pub sort_order: Option<i32>,
}
