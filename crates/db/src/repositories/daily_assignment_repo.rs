//! Repository for the `daily_assignments` table.

use callsheet_core::types::DbId;
use sqlx::PgPool;

use crate::models::daily_assignment::{DailyAssignment, UpsertDailyAssignment};

/// Column list for daily assignment queries.
const COLUMNS: &str =
    "id, project_id, talent_id, day, escort_assignment_id, created_at, updated_at";

/// Provides data access for the daily assignment grid.
pub struct DailyAssignmentRepo;

impl DailyAssignmentRepo {
    /// Upsert a talent-day slot. A repeated upsert for the same
    /// `(talent_id, day)` replaces the escort link.
    pub async fn upsert(
        pool: &PgPool,
        project_id: DbId,
        input: &UpsertDailyAssignment,
    ) -> Result<DailyAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_assignments (project_id, talent_id, day, escort_assignment_id)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (talent_id, day) DO UPDATE SET
                escort_assignment_id = EXCLUDED.escort_assignment_id,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DailyAssignment>(&query)
            .bind(project_id)
            .bind(input.talent_id)
            .bind(input.day)
            .bind(input.escort_assignment_id)
            .fetch_one(pool)
            .await
    }

    /// List the assignment grid for a project, day by day.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<DailyAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_assignments
             WHERE project_id = $1
             ORDER BY day ASC, talent_id ASC"
        );
        sqlx::query_as::<_, DailyAssignment>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Count completed slots (non-null escort link) for a project. Zero
    /// rows yield 0, not an error.
    pub async fn completed_count(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (Option<i64>,) = sqlx::query_as(
            "SELECT COUNT(*) FROM daily_assignments
             WHERE project_id = $1 AND escort_assignment_id IS NOT NULL",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0.unwrap_or(0))
    }
}
