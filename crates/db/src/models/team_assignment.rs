//! Team assignment entity model and DTOs.

use callsheet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A team assignment row: one person staffed on a project in one role
/// category.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamAssignment {
    pub id: DbId,
    pub project_id: DbId,
    pub person_name: String,
    pub role_category: String,
    pub created_at: Timestamp,
}

/// DTO for adding a person to the team.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamAssignment {
    pub person_name: String,
    pub role_category: String,
}
