//! Repository for the `talent` table.

use callsheet_core::types::DbId;
use sqlx::PgPool;

use crate::models::talent::{CreateTalentEntry, TalentEntry};

/// Column list for talent queries.
const COLUMNS: &str = "id, project_id, name, kind, created_at";

/// Provides data access for the talent roster.
pub struct TalentRepo;

impl TalentRepo {
    /// Add a talent entry to the roster, returning the created row.
    ///
    /// If `kind` is `None` in the input, defaults to `individual`.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateTalentEntry,
    ) -> Result<TalentEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO talent (project_id, name, kind)
             VALUES ($1, $2, COALESCE($3, 'individual'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TalentEntry>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.kind)
            .fetch_one(pool)
            .await
    }

    /// Find a roster entry scoped to a project.
    pub async fn find_scoped(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<TalentEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM talent WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, TalentEntry>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List roster entries for a project.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<TalentEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM talent
             WHERE project_id = $1
             ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, TalentEntry>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Remove a roster entry scoped to a project. Daily assignments for
    /// the entry cascade. Returns `true` if a row was deleted.
    pub async fn delete_scoped(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM talent WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count roster entries for a project. Individuals and groups both
    /// count once.
    pub async fn count_by_project(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (Option<i64>,) =
            sqlx::query_as("SELECT COUNT(*) FROM talent WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0.unwrap_or(0))
    }
}
