//! Role template entity model and DTOs.

use callsheet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A role template row from the `role_templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleTemplate {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub category: String,
    pub is_default: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a custom role template.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoleTemplate {
    pub name: String,
    pub category: String,
}
