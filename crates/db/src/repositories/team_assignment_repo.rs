//! Repository for the `team_assignments` table.

use callsheet_core::staffing::StaffBreakdown;
use callsheet_core::types::DbId;
use sqlx::PgPool;

use crate::models::team_assignment::{CreateTeamAssignment, TeamAssignment};

/// Column list for team assignment queries.
const COLUMNS: &str = "id, project_id, person_name, role_category, created_at";

/// Provides data access for project team assignments.
pub struct TeamAssignmentRepo;

impl TeamAssignmentRepo {
    /// Add a person to the team, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateTeamAssignment,
    ) -> Result<TeamAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO team_assignments (project_id, person_name, role_category)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamAssignment>(&query)
            .bind(project_id)
            .bind(&input.person_name)
            .bind(&input.role_category)
            .fetch_one(pool)
            .await
    }

    /// Find a team assignment scoped to a project.
    pub async fn find_scoped(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<TeamAssignment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM team_assignments WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, TeamAssignment>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List team assignments for a project, grouped by category in
    /// insertion order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<TeamAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM team_assignments
             WHERE project_id = $1
             ORDER BY role_category ASC, id ASC"
        );
        sqlx::query_as::<_, TeamAssignment>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Remove a team assignment scoped to a project. Returns `true` if a
    /// row was deleted.
    pub async fn delete_scoped(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM team_assignments WHERE id = $1 AND project_id = $2")
                .bind(id)
                .bind(project_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Per-category staff counts for a project. Zero rows yield an empty
    /// breakdown, not an error.
    pub async fn breakdown(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<StaffBreakdown, sqlx::Error> {
        let row: (Option<i64>, Option<i64>, Option<i64>) = sqlx::query_as(
            "SELECT
                COUNT(*) FILTER (WHERE role_category = 'supervisor'),
                COUNT(*) FILTER (WHERE role_category = 'coordinator'),
                COUNT(*) FILTER (WHERE role_category = 'escort')
             FROM team_assignments WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;

        Ok(StaffBreakdown {
            supervisors: row.0.unwrap_or(0),
            coordinators: row.1.unwrap_or(0),
            escorts: row.2.unwrap_or(0),
        })
    }
}
