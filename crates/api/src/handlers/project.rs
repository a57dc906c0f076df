//! Handlers for the `/projects` resource.
//!
//! Project creation seeds the default locations and role templates and
//! writes the initial readiness record, so every live project has a
//! readiness verdict from its first moment. Lifecycle transitions are
//! forward-only, and activation is gated on a guaranteed-fresh readiness
//! check.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use callsheet_core::error::CoreError;
use callsheet_core::project::{self, ProjectStatus};
use callsheet_core::readiness::{self, ChangeKind, ConfigurationSnapshot, OverallStatus};
use callsheet_core::staffing::StaffBreakdown;
use callsheet_core::types::DbId;
use callsheet_db::models::project::{CreateProject, UpdateProject};
use callsheet_db::models::readiness_record::UpsertReadinessRecord;
use callsheet_db::repositories::{
    LocationRepo, ProjectRepo, ReadinessRecordRepo, RoleTemplateRepo, DEFAULT_LOCATION_NAMES,
    DEFAULT_ROLE_TEMPLATES,
};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_project;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /projects
///
/// List all projects.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /projects
///
/// Create a project in `prep` status, seed its default locations and role
/// templates, and persist the empty-state readiness record.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Project name must not be empty".to_string(),
        ));
    }
    project::validate_date_range(input.start_date, input.end_date)?;

    let created = ProjectRepo::create(&state.pool, &input).await?;
    LocationRepo::seed_defaults(&state.pool, created.id).await?;
    RoleTemplateRepo::seed_defaults(&state.pool, created.id).await?;

    // The freshly seeded configuration is fully known without reading it
    // back: defaults only, nothing staffed, empty roster, no assignments.
    let snapshot = ConfigurationSnapshot {
        location_count: DEFAULT_LOCATION_NAMES.len() as i64,
        has_only_default_locations: true,
        locations_finalized: false,
        role_template_count: DEFAULT_ROLE_TEMPLATES.len() as i64,
        has_only_default_roles: true,
        roles_finalized: false,
        staff_count: 0,
        staff_breakdown: StaffBreakdown::default(),
        team_finalized: false,
        talent_count: 0,
        talent_finalized: false,
        total_possible_assignments: 0,
        completed_assignments: 0,
        assignments_closed_out: false,
    };
    let assessment = readiness::evaluate_snapshot(&snapshot)?;
    let initial = UpsertReadinessRecord::from_assessment(created.id, &assessment, Utc::now());
    ReadinessRecordRepo::insert_initial(&state.pool, &initial).await?;

    tracing::info!(project_id = created.id, name = %created.name, "Project created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ensure_project(&state.pool, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /projects/{id}
///
/// Update name and/or dates. Date changes resize the daily assignment
/// grid, so the readiness record is invalidated afterwards.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<impl IntoResponse> {
    let existing = ensure_project(&state.pool, id).await?;

    let start = input.start_date.unwrap_or(existing.start_date);
    let end = input.end_date.unwrap_or(existing.end_date);
    project::validate_date_range(start, end)?;

    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Project name must not be empty".to_string(),
            ));
        }
    }

    let updated = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            })
        })?;

    state
        .readiness
        .on_configuration_change(id, ChangeKind::Status, None)
        .await;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /projects/{id}
///
/// Delete a project. All configuration sources and the readiness record
/// cascade with it.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    tracing::info!(project_id = id, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /projects/{id}/activate
///
/// Move a project from `prep` to `active`. Forces a fresh readiness
/// computation first and refuses activation below `operational`.
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = ensure_project(&state.pool, id).await?;
    let current = ProjectStatus::from_str_db(&existing.status)?;
    project::validate_status_transition(current, ProjectStatus::Active)?;

    // Activation is a state-changing action: never gate it on a possibly
    // stale record.
    let record = state.readiness.force_refresh(id).await?;
    let overall = OverallStatus::from_str_db(&record.overall_status)?;
    if overall < OverallStatus::Operational {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Project is not ready to activate: {}",
            record.blocking_issues
        ))));
    }

    let activated = ProjectRepo::set_status(&state.pool, id, ProjectStatus::Active.as_str())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            })
        })?;

    state
        .readiness
        .on_configuration_change(id, ChangeKind::Status, None)
        .await;

    tracing::info!(project_id = id, "Project activated");

    Ok(Json(DataResponse { data: activated }))
}

/// POST /projects/{id}/complete
///
/// Move a project from `active` to `complete`.
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = ensure_project(&state.pool, id).await?;
    let current = ProjectStatus::from_str_db(&existing.status)?;
    project::validate_status_transition(current, ProjectStatus::Complete)?;

    let completed = ProjectRepo::set_status(&state.pool, id, ProjectStatus::Complete.as_str())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            })
        })?;

    state
        .readiness
        .on_configuration_change(id, ChangeKind::Status, None)
        .await;

    tracing::info!(project_id = id, "Project completed");

    Ok(Json(DataResponse { data: completed }))
}
