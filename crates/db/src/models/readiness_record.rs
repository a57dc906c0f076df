//! Readiness record model: the persisted aggregator output.

use callsheet_core::readiness::ReadinessAssessment;
use callsheet_core::types::{DbId, Timestamp};
use serde::Serialize;
use serde_json::json;
use sqlx::FromRow;

/// A row from the `readiness_records` table, 1:1 with a project.
///
/// Status fields hold the constrained strings produced by the core enums'
/// `as_str`; `blocking_issues` and `available_features` are JSON arrays of
/// strings. Rows are written only through the aggregator path.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReadinessRecord {
    pub project_id: DbId,
    pub locations_status: String,
    pub roles_status: String,
    pub team_status: String,
    pub talent_status: String,
    pub assignments_status: String,
    pub overall_status: String,
    pub blocking_issues: serde_json::Value,
    pub available_features: serde_json::Value,
    pub last_updated: Timestamp,
}

/// DTO for upserting a readiness record.
#[derive(Debug, Clone)]
pub struct UpsertReadinessRecord {
    pub project_id: DbId,
    pub locations_status: String,
    pub roles_status: String,
    pub team_status: String,
    pub talent_status: String,
    pub assignments_status: String,
    pub overall_status: String,
    pub blocking_issues: serde_json::Value,
    pub available_features: serde_json::Value,
    pub last_updated: Timestamp,
}

impl UpsertReadinessRecord {
    /// Build an upsert DTO from one atomic aggregator result.
    pub fn from_assessment(
        project_id: DbId,
        assessment: &ReadinessAssessment,
        last_updated: Timestamp,
    ) -> Self {
        Self {
            project_id,
            locations_status: assessment.locations_status.as_str().to_string(),
            roles_status: assessment.roles_status.as_str().to_string(),
            team_status: assessment.team_status.as_str().to_string(),
            talent_status: assessment.talent_status.as_str().to_string(),
            assignments_status: assessment.assignments_status.as_str().to_string(),
            overall_status: assessment.overall_status.as_str().to_string(),
            blocking_issues: json!(assessment.blocking_issues),
            available_features: json!(assessment.available_features),
            last_updated,
        }
    }
}
