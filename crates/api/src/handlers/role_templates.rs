//! Handlers for project role templates.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use callsheet_core::error::CoreError;
use callsheet_core::readiness::ChangeKind;
use callsheet_core::staffing::RoleCategory;
use callsheet_core::types::DbId;
use callsheet_db::models::role_template::CreateRoleTemplate;
use callsheet_db::repositories::{ProjectRepo, RoleTemplateRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_project;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /projects/{project_id}/role-templates
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_project(&state.pool, project_id).await?;
    let templates = RoleTemplateRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: templates }))
}

/// POST /projects/{project_id}/role-templates
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateRoleTemplate>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Role template name must not be empty".to_string(),
        ));
    }
    RoleCategory::from_str_db(&input.category)?;
    ensure_project(&state.pool, project_id).await?;

    let template = RoleTemplateRepo::create(&state.pool, project_id, &input).await?;

    tracing::info!(project_id, template_id = template.id, "Role template created");

    state
        .readiness
        .on_configuration_change(project_id, ChangeKind::Roles, None)
        .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}

/// DELETE /projects/{project_id}/role-templates/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let deleted = RoleTemplateRepo::delete_scoped(&state.pool, project_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "RoleTemplate",
            id,
        }));
    }

    tracing::info!(project_id, template_id = id, "Role template deleted");

    state
        .readiness
        .on_configuration_change(project_id, ChangeKind::Roles, None)
        .await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /projects/{project_id}/role-templates/finalize
///
/// Lock the role template set for the project.
pub async fn finalize(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::finalize_roles(&state.pool, project_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            })
        })?;

    tracing::info!(project_id, "Role templates finalized");

    state
        .readiness
        .on_configuration_change(project_id, ChangeKind::Roles, None)
        .await;

    Ok(Json(DataResponse { data: project }))
}
