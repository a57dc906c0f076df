//! Route definitions for the `/projects` resource.
//!
//! Nests every project-scoped configuration source, the daily assignment
//! grid, and the readiness resource under `/projects/{project_id}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{assignments, locations, project, readiness, role_templates, talent, team};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                      -> list
/// POST   /                                      -> create
/// GET    /{id}                                  -> get_by_id
/// PUT    /{id}                                  -> update
/// DELETE /{id}                                  -> delete
/// POST   /{id}/activate                         -> activate
/// POST   /{id}/complete                         -> complete
///
/// GET    /{project_id}/locations                -> list_by_project
/// POST   /{project_id}/locations                -> create
/// DELETE /{project_id}/locations/{id}           -> delete
/// POST   /{project_id}/locations/finalize       -> finalize
///
/// GET    /{project_id}/role-templates           -> list_by_project
/// POST   /{project_id}/role-templates           -> create
/// DELETE /{project_id}/role-templates/{id}      -> delete
/// POST   /{project_id}/role-templates/finalize  -> finalize
///
/// GET    /{project_id}/team                     -> list_by_project
/// POST   /{project_id}/team                     -> create
/// DELETE /{project_id}/team/{id}                -> delete
/// POST   /{project_id}/team/finalize            -> finalize
///
/// GET    /{project_id}/talent                   -> list_by_project
/// POST   /{project_id}/talent                   -> create
/// DELETE /{project_id}/talent/{id}              -> delete
/// POST   /{project_id}/talent/finalize          -> finalize
///
/// GET    /{project_id}/daily-assignments        -> list_by_project
/// POST   /{project_id}/daily-assignments        -> upsert
/// POST   /{project_id}/daily-assignments/close-out -> close_out
///
/// GET    /{project_id}/readiness                -> get_readiness
/// POST   /{project_id}/readiness/refresh        -> refresh
/// ```
pub fn router() -> Router<AppState> {
    let location_routes = Router::new()
        .route("/", get(locations::list_by_project).post(locations::create))
        .route("/{id}", axum::routing::delete(locations::delete))
        .route("/finalize", post(locations::finalize));

    let role_template_routes = Router::new()
        .route(
            "/",
            get(role_templates::list_by_project).post(role_templates::create),
        )
        .route("/{id}", axum::routing::delete(role_templates::delete))
        .route("/finalize", post(role_templates::finalize));

    let team_routes = Router::new()
        .route("/", get(team::list_by_project).post(team::create))
        .route("/{id}", axum::routing::delete(team::delete))
        .route("/finalize", post(team::finalize));

    let talent_routes = Router::new()
        .route("/", get(talent::list_by_project).post(talent::create))
        .route("/{id}", axum::routing::delete(talent::delete))
        .route("/finalize", post(talent::finalize));

    let assignment_routes = Router::new()
        .route(
            "/",
            get(assignments::list_by_project).post(assignments::upsert),
        )
        .route("/close-out", post(assignments::close_out));

    let readiness_routes = Router::new()
        .route("/", get(readiness::get_readiness))
        .route("/refresh", post(readiness::refresh));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/activate", post(project::activate))
        .route("/{id}/complete", post(project::complete))
        .nest("/{project_id}/locations", location_routes)
        .nest("/{project_id}/role-templates", role_template_routes)
        .nest("/{project_id}/team", team_routes)
        .nest("/{project_id}/talent", talent_routes)
        .nest("/{project_id}/daily-assignments", assignment_routes)
        .nest("/{project_id}/readiness", readiness_routes)
}
