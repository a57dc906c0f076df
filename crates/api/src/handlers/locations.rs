//! Handlers for project locations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use callsheet_core::error::CoreError;
use callsheet_core::readiness::ChangeKind;
use callsheet_core::types::DbId;
use callsheet_db::models::location::CreateLocation;
use callsheet_db::repositories::{LocationRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_project;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /projects/{project_id}/locations
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_project(&state.pool, project_id).await?;
    let locations = LocationRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: locations }))
}

/// POST /projects/{project_id}/locations
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateLocation>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Location name must not be empty".to_string(),
        ));
    }
    ensure_project(&state.pool, project_id).await?;

    let location = LocationRepo::create(&state.pool, project_id, &input).await?;

    tracing::info!(project_id, location_id = location.id, "Location created");

    state
        .readiness
        .on_configuration_change(project_id, ChangeKind::Locations, None)
        .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: location })))
}

/// DELETE /projects/{project_id}/locations/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let deleted = LocationRepo::delete_scoped(&state.pool, project_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }));
    }

    tracing::info!(project_id, location_id = id, "Location deleted");

    state
        .readiness
        .on_configuration_change(project_id, ChangeKind::Locations, None)
        .await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /projects/{project_id}/locations/finalize
///
/// Lock the location set for the project.
pub async fn finalize(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::finalize_locations(&state.pool, project_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            })
        })?;

    tracing::info!(project_id, "Locations finalized");

    state
        .readiness
        .on_configuration_change(project_id, ChangeKind::Locations, None)
        .await;

    Ok(Json(DataResponse { data: project }))
}
