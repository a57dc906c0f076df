//! Handlers for the project talent roster.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use callsheet_core::error::CoreError;
use callsheet_core::readiness::ChangeKind;
use callsheet_core::roster::TalentKind;
use callsheet_core::types::DbId;
use callsheet_db::models::talent::CreateTalentEntry;
use callsheet_db::repositories::{ProjectRepo, ReadinessRecordRepo, TalentRepo};

use crate::engine::coordinator::optimistic_echo;
use crate::error::{AppError, AppResult};
use crate::handlers::ensure_project;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /projects/{project_id}/talent
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_project(&state.pool, project_id).await?;
    let roster = TalentRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: roster }))
}

/// POST /projects/{project_id}/talent
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateTalentEntry>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Talent name must not be empty".to_string(),
        ));
    }
    if let Some(kind) = &input.kind {
        TalentKind::from_str_db(kind)?;
    }
    ensure_project(&state.pool, project_id).await?;

    let entry = TalentRepo::create(&state.pool, project_id, &input).await?;

    tracing::info!(project_id, talent_id = entry.id, kind = %entry.kind, "Talent added");

    let echo = ReadinessRecordRepo::find_by_project_id(&state.pool, project_id)
        .await?
        .map(|record| optimistic_echo(&record, ChangeKind::Talent));
    state
        .readiness
        .on_configuration_change(project_id, ChangeKind::Talent, echo)
        .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// DELETE /projects/{project_id}/talent/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let deleted = TalentRepo::delete_scoped(&state.pool, project_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TalentEntry",
            id,
        }));
    }

    tracing::info!(project_id, talent_id = id, "Talent removed");

    state
        .readiness
        .on_configuration_change(project_id, ChangeKind::Talent, None)
        .await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /projects/{project_id}/talent/finalize
///
/// Lock the talent roster for the project.
pub async fn finalize(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::finalize_talent(&state.pool, project_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            })
        })?;

    tracing::info!(project_id, "Talent roster finalized");

    state
        .readiness
        .on_configuration_change(project_id, ChangeKind::Talent, None)
        .await;

    Ok(Json(DataResponse { data: project }))
}
