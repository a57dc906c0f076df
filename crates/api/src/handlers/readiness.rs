//! Handlers for the project readiness resource.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use callsheet_core::types::DbId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /projects/{project_id}/readiness
///
/// Serve the latest readiness record: the optimistic echo while a
/// recomputation is in flight, otherwise the stored value.
pub async fn get_readiness(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = state.readiness.get_readiness(project_id).await?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /projects/{project_id}/readiness/refresh
///
/// Synchronously recompute and return a guaranteed-fresh record.
pub async fn refresh(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = state.readiness.force_refresh(project_id).await?;

    tracing::info!(project_id, overall = %record.overall_status, "Readiness force-refreshed");

    Ok(Json(DataResponse { data: record }))
}
