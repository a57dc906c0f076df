//! Configuration snapshot loading.
//!
//! Assembles one [`ConfigurationSnapshot`] per call: a single round of
//! reads against every configuration source for a project, joined before
//! anything is computed. A source with zero rows contributes zero counts;
//! a failed or timed-out read aborts the whole snapshot so a transient
//! error can never masquerade as an empty configuration.

use std::time::Duration;

use callsheet_core::error::CoreError;
use callsheet_core::project;
use callsheet_core::readiness::ConfigurationSnapshot;
use callsheet_core::types::DbId;
use callsheet_db::repositories::{
    DailyAssignmentRepo, LocationRepo, ProjectRepo, RoleTemplateRepo, TalentRepo,
    TeamAssignmentRepo,
};
use callsheet_db::DbPool;

/// Why a snapshot could not be assembled.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The project itself does not exist. No snapshot is fabricated.
    #[error("Project {0} not found")]
    ProjectNotFound(DbId),

    /// A configuration source read failed. Transient; callers should
    /// retry or serve the last-known readiness record.
    #[error("Configuration source read failed: {0}")]
    Read(#[from] sqlx::Error),

    /// The combined read deadline elapsed before all sources answered.
    #[error("Snapshot read timed out after {0:?}")]
    Timeout(Duration),

    /// The loaded data violated a domain rule (e.g. an inverted project
    /// date range slipped past validation).
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Load a configuration snapshot for `project_id`.
///
/// One `timeout` spans all source reads combined. On timeout the whole
/// computation is abandoned; no partial snapshot is ever returned.
pub async fn load(
    pool: &DbPool,
    project_id: DbId,
    timeout: Duration,
) -> Result<ConfigurationSnapshot, SnapshotError> {
    match tokio::time::timeout(timeout, load_unbounded(pool, project_id)).await {
        Ok(result) => result,
        Err(_) => Err(SnapshotError::Timeout(timeout)),
    }
}

async fn load_unbounded(
    pool: &DbPool,
    project_id: DbId,
) -> Result<ConfigurationSnapshot, SnapshotError> {
    let project = ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or(SnapshotError::ProjectNotFound(project_id))?;

    // The five source reads are independent; issue them concurrently and
    // join all results before computing anything.
    let (location_counts, role_counts, staff_breakdown, talent_count, completed_assignments) =
        tokio::try_join!(
            LocationRepo::counts(pool, project_id),
            RoleTemplateRepo::counts(pool, project_id),
            TeamAssignmentRepo::breakdown(pool, project_id),
            TalentRepo::count_by_project(pool, project_id),
            DailyAssignmentRepo::completed_count(pool, project_id),
        )?;

    let (location_count, custom_locations) = location_counts;
    let (role_template_count, custom_roles) = role_counts;

    let duration_days = project::duration_days(project.start_date, project.end_date)?;

    Ok(ConfigurationSnapshot {
        location_count,
        has_only_default_locations: custom_locations == 0,
        locations_finalized: project.locations_finalized,
        role_template_count,
        has_only_default_roles: custom_roles == 0,
        roles_finalized: project.roles_finalized,
        staff_count: staff_breakdown.total(),
        staff_breakdown,
        team_finalized: project.team_finalized,
        talent_count,
        talent_finalized: project.talent_finalized,
        total_possible_assignments: talent_count * duration_days,
        completed_assignments,
        assignments_closed_out: project.assignments_closed_out,
    })
}
