//! Handlers for project team assignments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use callsheet_core::error::CoreError;
use callsheet_core::readiness::ChangeKind;
use callsheet_core::staffing::RoleCategory;
use callsheet_core::types::DbId;
use callsheet_db::models::team_assignment::CreateTeamAssignment;
use callsheet_db::repositories::{ProjectRepo, ReadinessRecordRepo, TeamAssignmentRepo};

use crate::engine::coordinator::optimistic_echo;
use crate::error::{AppError, AppResult};
use crate::handlers::ensure_project;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /projects/{project_id}/team
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_project(&state.pool, project_id).await?;
    let members = TeamAssignmentRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// POST /projects/{project_id}/team
///
/// Staff a person on the project. The response carries the new row while
/// the readiness recomputation proceeds with an optimistic echo: team
/// status is at least `partial` the moment this commit lands.
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateTeamAssignment>,
) -> AppResult<impl IntoResponse> {
    if input.person_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Person name must not be empty".to_string(),
        ));
    }
    RoleCategory::from_str_db(&input.role_category)?;
    ensure_project(&state.pool, project_id).await?;

    let member = TeamAssignmentRepo::create(&state.pool, project_id, &input).await?;

    tracing::info!(
        project_id,
        member_id = member.id,
        role_category = %member.role_category,
        "Team member added"
    );

    let echo = ReadinessRecordRepo::find_by_project_id(&state.pool, project_id)
        .await?
        .map(|record| optimistic_echo(&record, ChangeKind::Team));
    state
        .readiness
        .on_configuration_change(project_id, ChangeKind::Team, echo)
        .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// DELETE /projects/{project_id}/team/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let deleted = TeamAssignmentRepo::delete_scoped(&state.pool, project_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TeamAssignment",
            id,
        }));
    }

    tracing::info!(project_id, member_id = id, "Team member removed");

    state
        .readiness
        .on_configuration_change(project_id, ChangeKind::Team, None)
        .await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /projects/{project_id}/team/finalize
///
/// Lock the team for the project.
pub async fn finalize(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::finalize_team(&state.pool, project_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            })
        })?;

    tracing::info!(project_id, "Team finalized");

    state
        .readiness
        .on_configuration_change(project_id, ChangeKind::Team, None)
        .await;

    Ok(Json(DataResponse { data: project }))
}
