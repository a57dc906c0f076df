//! Project entity model and DTOs.

use callsheet_core::types::{Day, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub status: String,
    pub start_date: Day,
    pub end_date: Day,
    pub locations_finalized: bool,
    pub roles_finalized: bool,
    pub team_finalized: bool,
    pub talent_finalized: bool,
    pub assignments_closed_out: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. Status always starts at `prep`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub start_date: Day,
    pub end_date: Day,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub start_date: Option<Day>,
    pub end_date: Option<Day>,
}
