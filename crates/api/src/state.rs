use std::sync::Arc;

use crate::config::ServerConfig;
use crate::engine::coordinator::ReadinessCoordinator;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: callsheet_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Readiness invalidation/refresh coordinator.
    pub readiness: ReadinessCoordinator,
}
