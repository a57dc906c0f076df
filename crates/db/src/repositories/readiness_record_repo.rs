//! Repository for the `readiness_records` table.

use callsheet_core::types::DbId;
use sqlx::PgPool;

use crate::models::readiness_record::{ReadinessRecord, UpsertReadinessRecord};

/// Column list for readiness record queries.
const COLUMNS: &str = "project_id, locations_status, roles_status, team_status, \
     talent_status, assignments_status, overall_status, blocking_issues, \
     available_features, last_updated";

/// Provides data access for the readiness store.
pub struct ReadinessRecordRepo;

impl ReadinessRecordRepo {
    /// Insert the initial record for a freshly created project.
    ///
    /// Does nothing if a record already exists (the aggregator may have
    /// raced ahead); returns the inserted row, or `None` on conflict.
    pub async fn insert_initial(
        pool: &PgPool,
        input: &UpsertReadinessRecord,
    ) -> Result<Option<ReadinessRecord>, sqlx::Error> {
        let query = format!(
            "INSERT INTO readiness_records
                (project_id, locations_status, roles_status, team_status,
                 talent_status, assignments_status, overall_status,
                 blocking_issues, available_features, last_updated)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (project_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReadinessRecord>(&query)
            .bind(input.project_id)
            .bind(&input.locations_status)
            .bind(&input.roles_status)
            .bind(&input.team_status)
            .bind(&input.talent_status)
            .bind(&input.assignments_status)
            .bind(&input.overall_status)
            .bind(&input.blocking_issues)
            .bind(&input.available_features)
            .bind(input.last_updated)
            .fetch_optional(pool)
            .await
    }

    /// Upsert a readiness record with last-write-wins semantics.
    ///
    /// The update only applies when the incoming `last_updated` is not
    /// older than the stored one, so a recomputation that started before
    /// another cannot overwrite a result computed from newer mutations.
    /// Returns `None` when the guard rejects the write (the stale result
    /// is discarded, not an error).
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertReadinessRecord,
    ) -> Result<Option<ReadinessRecord>, sqlx::Error> {
        let query = format!(
            "INSERT INTO readiness_records
                (project_id, locations_status, roles_status, team_status,
                 talent_status, assignments_status, overall_status,
                 blocking_issues, available_features, last_updated)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (project_id) DO UPDATE SET
                locations_status = EXCLUDED.locations_status,
                roles_status = EXCLUDED.roles_status,
                team_status = EXCLUDED.team_status,
                talent_status = EXCLUDED.talent_status,
                assignments_status = EXCLUDED.assignments_status,
                overall_status = EXCLUDED.overall_status,
                blocking_issues = EXCLUDED.blocking_issues,
                available_features = EXCLUDED.available_features,
                last_updated = EXCLUDED.last_updated
             WHERE readiness_records.last_updated <= EXCLUDED.last_updated
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReadinessRecord>(&query)
            .bind(input.project_id)
            .bind(&input.locations_status)
            .bind(&input.roles_status)
            .bind(&input.team_status)
            .bind(&input.talent_status)
            .bind(&input.assignments_status)
            .bind(&input.overall_status)
            .bind(&input.blocking_issues)
            .bind(&input.available_features)
            .bind(input.last_updated)
            .fetch_optional(pool)
            .await
    }

    /// Find the stored record for a project.
    pub async fn find_by_project_id(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<ReadinessRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM readiness_records WHERE project_id = $1");
        sqlx::query_as::<_, ReadinessRecord>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }
}
