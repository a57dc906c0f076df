//! HTTP request handlers, one module per resource.

pub mod assignments;
pub mod locations;
pub mod project;
pub mod readiness;
pub mod role_templates;
pub mod talent;
pub mod team;

use callsheet_core::error::CoreError;
use callsheet_core::types::DbId;
use callsheet_db::models::project::Project;
use callsheet_db::repositories::ProjectRepo;
use callsheet_db::DbPool;

use crate::error::AppError;

/// Fetch a project or fail with 404. Used by every project-scoped handler.
pub(crate) async fn ensure_project(pool: &DbPool, project_id: DbId) -> Result<Project, AppError> {
    ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            })
        })
}
