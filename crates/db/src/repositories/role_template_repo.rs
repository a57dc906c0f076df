//! Repository for the `role_templates` table.

use callsheet_core::types::DbId;
use sqlx::PgPool;

use crate::models::role_template::{CreateRoleTemplate, RoleTemplate};

/// Column list for role template queries.
const COLUMNS: &str = "id, project_id, name, category, is_default, created_at";

/// Baseline role templates every project starts with: `(name, category)`.
pub const DEFAULT_ROLE_TEMPLATES: &[(&str, &str)] = &[
    ("Set Supervisor", "supervisor"),
    ("Talent Coordinator", "coordinator"),
    ("Talent Escort", "escort"),
];

/// Provides data access for project role templates.
pub struct RoleTemplateRepo;

impl RoleTemplateRepo {
    /// Seed the default role templates for a new project.
    ///
    /// Idempotent: re-seeding an already-seeded project inserts nothing.
    pub async fn seed_defaults(pool: &PgPool, project_id: DbId) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;
        for (name, category) in DEFAULT_ROLE_TEMPLATES {
            let result = sqlx::query(
                "INSERT INTO role_templates (project_id, name, category, is_default)
                 VALUES ($1, $2, $3, TRUE)
                 ON CONFLICT (project_id, name) DO NOTHING",
            )
            .bind(project_id)
            .bind(name)
            .bind(category)
            .execute(pool)
            .await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    /// Insert a custom role template, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateRoleTemplate,
    ) -> Result<RoleTemplate, sqlx::Error> {
        let query = format!(
            "INSERT INTO role_templates (project_id, name, category, is_default)
             VALUES ($1, $2, $3, FALSE)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RoleTemplate>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.category)
            .fetch_one(pool)
            .await
    }

    /// List role templates for a project.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<RoleTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM role_templates
             WHERE project_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, RoleTemplate>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a role template scoped to a project. Returns `true` if a row
    /// was deleted.
    pub async fn delete_scoped(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM role_templates WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count role templates for a project.
    ///
    /// Returns `(total, custom)` where `custom` excludes the seeded
    /// defaults.
    pub async fn counts(pool: &PgPool, project_id: DbId) -> Result<(i64, i64), sqlx::Error> {
        let row: (Option<i64>, Option<i64>) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE NOT is_default)
             FROM role_templates WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;
        Ok((row.0.unwrap_or(0), row.1.unwrap_or(0)))
    }
}
