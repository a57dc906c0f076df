//! Repository for the `locations` table.

use callsheet_core::types::DbId;
use sqlx::PgPool;

use crate::models::location::{CreateLocation, Location};

/// Column list for location queries.
const COLUMNS: &str = "id, project_id, name, is_default, sort_order, created_at";

/// Baseline locations every project starts with.
pub const DEFAULT_LOCATION_NAMES: &[&str] = &["House", "Stage", "Holding"];

/// Provides data access for project locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Seed the default location set for a new project.
    ///
    /// Idempotent: re-seeding an already-seeded project inserts nothing.
    pub async fn seed_defaults(pool: &PgPool, project_id: DbId) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;
        for (i, name) in DEFAULT_LOCATION_NAMES.iter().enumerate() {
            let result = sqlx::query(
                "INSERT INTO locations (project_id, name, is_default, sort_order)
                 VALUES ($1, $2, TRUE, $3)
                 ON CONFLICT (project_id, name) DO NOTHING",
            )
            .bind(project_id)
            .bind(name)
            .bind(i as i32)
            .execute(pool)
            .await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    /// Insert a custom location, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateLocation,
    ) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (project_id, name, is_default, sort_order)
             VALUES ($1, $2, FALSE, COALESCE($3, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// List locations for a project. Returns an empty vec when none exist.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations
             WHERE project_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a location scoped to a project. Returns `true` if a row was
    /// deleted.
    pub async fn delete_scoped(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count locations for a project.
    ///
    /// Returns `(total, custom)` where `custom` excludes the seeded
    /// defaults. Zero rows yield `(0, 0)`, not an error.
    pub async fn counts(pool: &PgPool, project_id: DbId) -> Result<(i64, i64), sqlx::Error> {
        let row: (Option<i64>, Option<i64>) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE NOT is_default)
             FROM locations WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;
        Ok((row.0.unwrap_or(0), row.1.unwrap_or(0)))
    }
}
