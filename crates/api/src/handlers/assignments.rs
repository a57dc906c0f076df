//! Handlers for the daily assignment grid.
//!
//! Slots are keyed by `(talent, day)`; upserting the same slot replaces
//! the escort link. Close-out is the explicit action that distinguishes a
//! merely fully-covered grid (`current`) from a locked one (`complete`),
//! and is only permitted once every slot is covered.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use callsheet_core::error::CoreError;
use callsheet_core::readiness::ChangeKind;
use callsheet_core::staffing::RoleCategory;
use callsheet_core::types::DbId;
use callsheet_db::models::daily_assignment::UpsertDailyAssignment;
use callsheet_db::repositories::{
    DailyAssignmentRepo, ProjectRepo, ReadinessRecordRepo, TalentRepo, TeamAssignmentRepo,
};

use crate::engine::coordinator::optimistic_echo;
use crate::engine::snapshot;
use crate::error::{AppError, AppResult};
use crate::handlers::ensure_project;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /projects/{project_id}/daily-assignments
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_project(&state.pool, project_id).await?;
    let grid = DailyAssignmentRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: grid }))
}

/// POST /projects/{project_id}/daily-assignments
///
/// Upsert one talent-day slot. The day must fall within the project's
/// date range, the talent entry must belong to the project, and the
/// escort link (when present) must point at an escort-category team
/// assignment on the same project.
pub async fn upsert(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<UpsertDailyAssignment>,
) -> AppResult<impl IntoResponse> {
    let project = ensure_project(&state.pool, project_id).await?;

    if input.day < project.start_date || input.day > project.end_date {
        return Err(AppError::BadRequest(format!(
            "Day {} is outside the project date range {} to {}",
            input.day, project.start_date, project.end_date
        )));
    }

    TalentRepo::find_scoped(&state.pool, project_id, input.talent_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "TalentEntry",
                id: input.talent_id,
            })
        })?;

    if let Some(escort_id) = input.escort_assignment_id {
        let escort = TeamAssignmentRepo::find_scoped(&state.pool, project_id, escort_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "TeamAssignment",
                    id: escort_id,
                })
            })?;
        if RoleCategory::from_str_db(&escort.role_category)? != RoleCategory::Escort {
            return Err(AppError::BadRequest(format!(
                "Team assignment {escort_id} is a {} and cannot cover a talent day",
                escort.role_category
            )));
        }
    }

    let slot = DailyAssignmentRepo::upsert(&state.pool, project_id, &input).await?;

    tracing::info!(
        project_id,
        talent_id = slot.talent_id,
        day = %slot.day,
        escort_assignment_id = slot.escort_assignment_id,
        "Daily assignment upserted"
    );

    let echo = ReadinessRecordRepo::find_by_project_id(&state.pool, project_id)
        .await?
        .map(|record| optimistic_echo(&record, ChangeKind::Assignments));
    state
        .readiness
        .on_configuration_change(project_id, ChangeKind::Assignments, echo)
        .await;

    Ok(Json(DataResponse { data: slot }))
}

/// POST /projects/{project_id}/daily-assignments/close-out
///
/// Lock the assignment grid. Refused while any talent-day slot is still
/// uncovered, so `complete` always implies full coverage.
pub async fn close_out(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = snapshot::load(
        &state.pool,
        project_id,
        state.config.snapshot_timeout(),
    )
    .await?;

    if current.total_possible_assignments == 0
        || current.completed_assignments < current.total_possible_assignments
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot close out assignments: {} of {} slots covered",
            current.completed_assignments, current.total_possible_assignments
        ))));
    }

    let project = ProjectRepo::close_out_assignments(&state.pool, project_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            })
        })?;

    tracing::info!(project_id, "Daily assignments closed out");

    state
        .readiness
        .on_configuration_change(project_id, ChangeKind::Assignments, None)
        .await;

    Ok(Json(DataResponse { data: project }))
}
