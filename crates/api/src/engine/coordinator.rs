//! Readiness invalidation and refresh coordination.
//!
//! Every configuration source mutation handler calls
//! [`ReadinessCoordinator::on_configuration_change`] after a successful
//! commit. The coordinator collapses bursts of invalidations for the same
//! project into at most one trailing recomputation (the aggregator always
//! reads full current state, so intermediate runs would be wasted work),
//! holds the optimistic echo a caller may provide, and exposes the
//! synchronous [`force_refresh`](ReadinessCoordinator::force_refresh)
//! path for callers that need a guaranteed-fresh verdict.
//!
//! Failure policy: a failed recomputation leaves the previously stored
//! record in place (stale-but-valid) and is logged; the store is never
//! updated from a partial result.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;

use callsheet_core::error::CoreError;
use callsheet_core::readiness::{self, AssignmentsStatus, ChangeKind, RosterStatus, SetupStatus};
use callsheet_core::types::DbId;
use callsheet_db::models::readiness_record::{ReadinessRecord, UpsertReadinessRecord};
use callsheet_db::repositories::{ProjectRepo, ReadinessRecordRepo};
use callsheet_db::DbPool;

use crate::engine::snapshot;
use crate::error::AppError;

/// Per-project recomputation state.
#[derive(Default)]
struct ProjectSlot {
    /// A recomputation task is currently running for this project.
    running: bool,
    /// Another invalidation arrived while the task was running; the task
    /// re-runs once more before going idle.
    dirty: bool,
    /// Optimistic guess served to readers until the running task lands.
    echo: Option<ReadinessRecord>,
}

struct CoordinatorInner {
    pool: DbPool,
    snapshot_timeout: Duration,
    slots: Mutex<HashMap<DbId, ProjectSlot>>,
}

/// Coordinates readiness recomputation per project.
///
/// Cheaply cloneable (inner state is behind `Arc`); one instance is shared
/// across the application via [`crate::state::AppState`].
#[derive(Clone)]
pub struct ReadinessCoordinator {
    inner: Arc<CoordinatorInner>,
}

impl ReadinessCoordinator {
    pub fn new(pool: DbPool, snapshot_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                pool,
                snapshot_timeout,
                slots: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Record a configuration source mutation and schedule recomputation.
    ///
    /// If a recomputation for the project is already in flight, the call
    /// only marks the slot dirty: the running task re-runs once at the
    /// end, so any burst of invalidations collapses to a single trailing
    /// recomputation.
    ///
    /// `optimistic` is the caller's in-memory guess of the new readiness
    /// state. It is served by [`get_readiness`](Self::get_readiness) until
    /// the authoritative recomputation lands, at which point the stored
    /// record supersedes it.
    pub async fn on_configuration_change(
        &self,
        project_id: DbId,
        kind: ChangeKind,
        optimistic: Option<ReadinessRecord>,
    ) {
        let spawn_worker = {
            let mut slots = self.inner.slots.lock().await;
            let slot = slots.entry(project_id).or_default();
            if optimistic.is_some() {
                slot.echo = optimistic;
            }
            if slot.running {
                slot.dirty = true;
                false
            } else {
                slot.running = true;
                true
            }
        };

        tracing::debug!(
            project_id,
            change = kind.as_str(),
            coalesced = !spawn_worker,
            "Configuration change"
        );

        if spawn_worker {
            let coordinator = self.clone();
            tokio::spawn(async move {
                coordinator.recompute_until_clean(project_id).await;
            });
        }
    }

    /// Serve the readiness record for a project.
    ///
    /// Returns the optimistic echo while a recomputation is in flight,
    /// otherwise the stored record. Only when no record exists (a project
    /// created before its initial record landed) does this compute inline,
    /// once.
    pub async fn get_readiness(&self, project_id: DbId) -> Result<ReadinessRecord, AppError> {
        {
            let slots = self.inner.slots.lock().await;
            if let Some(slot) = slots.get(&project_id) {
                if slot.running {
                    if let Some(echo) = &slot.echo {
                        return Ok(echo.clone());
                    }
                }
            }
        }

        if let Some(record) =
            ReadinessRecordRepo::find_by_project_id(&self.inner.pool, project_id).await?
        {
            return Ok(record);
        }

        if ProjectRepo::find_by_id(&self.inner.pool, project_id)
            .await?
            .is_none()
        {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            }));
        }

        self.force_refresh(project_id).await
    }

    /// Synchronously recompute, persist, and return a guaranteed-fresh
    /// record. Used before state-changing actions such as activating a
    /// project.
    pub async fn force_refresh(&self, project_id: DbId) -> Result<ReadinessRecord, AppError> {
        match self.recompute(project_id).await? {
            Some(record) => Ok(record),
            // The store guard rejected the write: a computation over newer
            // state landed first. Its record is the fresh one.
            None => ReadinessRecordRepo::find_by_project_id(&self.inner.pool, project_id)
                .await?
                .ok_or_else(|| {
                    AppError::InternalError(format!(
                        "Readiness record for project {project_id} disappeared during refresh"
                    ))
                }),
        }
    }

    /// One atomic aggregator invocation: load the snapshot, evaluate it,
    /// upsert the result. Returns `None` when the last-write-wins guard
    /// discarded the result as stale.
    async fn recompute(&self, project_id: DbId) -> Result<Option<ReadinessRecord>, AppError> {
        let snapshot =
            snapshot::load(&self.inner.pool, project_id, self.inner.snapshot_timeout).await?;
        let assessment = readiness::evaluate_snapshot(&snapshot)?;
        let input = UpsertReadinessRecord::from_assessment(project_id, &assessment, Utc::now());
        let stored = ReadinessRecordRepo::upsert(&self.inner.pool, &input).await?;

        match &stored {
            Some(record) => tracing::info!(
                project_id,
                overall = %record.overall_status,
                "Readiness recomputed"
            ),
            None => tracing::debug!(project_id, "Stale readiness recomputation discarded"),
        }

        Ok(stored)
    }

    /// Recompute until no further invalidation arrived mid-run, then
    /// release the slot and drop any optimistic echo.
    async fn recompute_until_clean(&self, project_id: DbId) {
        loop {
            if let Err(e) = self.recompute(project_id).await {
                // Keep the previous stored record; a transient failure must
                // not downgrade displayed readiness.
                tracing::error!(project_id, error = %e, "Readiness recomputation failed");
            }

            let mut slots = self.inner.slots.lock().await;
            let slot = slots.entry(project_id).or_default();
            if slot.dirty {
                slot.dirty = false;
                continue;
            }
            slot.running = false;
            slot.echo = None;
            break;
        }
    }
}

/// Build an optimistic echo from the last stored record: the category the
/// mutation touched is floored at its first populated status, everything
/// else is carried over unchanged.
///
/// The guess is intentionally conservative; the authoritative
/// recomputation supersedes it on the next read regardless.
pub fn optimistic_echo(record: &ReadinessRecord, kind: ChangeKind) -> ReadinessRecord {
    let mut echo = record.clone();
    match kind {
        ChangeKind::Locations => {
            echo.locations_status = floor_setup(&echo.locations_status);
        }
        ChangeKind::Roles => {
            echo.roles_status = floor_setup(&echo.roles_status);
        }
        ChangeKind::Team => {
            echo.team_status = floor_roster(&echo.team_status);
        }
        ChangeKind::Talent => {
            echo.talent_status = floor_roster(&echo.talent_status);
        }
        ChangeKind::Assignments => {
            echo.assignments_status = floor_assignments(&echo.assignments_status);
        }
        ChangeKind::Status => {}
    }
    echo
}

fn floor_setup(status: &str) -> String {
    match SetupStatus::from_str_db(status) {
        Ok(parsed) => parsed.max(SetupStatus::Configured).as_str().to_string(),
        Err(_) => status.to_string(),
    }
}

fn floor_roster(status: &str) -> String {
    match RosterStatus::from_str_db(status) {
        Ok(parsed) => parsed.max(RosterStatus::Partial).as_str().to_string(),
        Err(_) => status.to_string(),
    }
}

fn floor_assignments(status: &str) -> String {
    match AssignmentsStatus::from_str_db(status) {
        Ok(parsed) => parsed.max(AssignmentsStatus::Partial).as_str().to_string(),
        Err(_) => status.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> ReadinessRecord {
        ReadinessRecord {
            project_id: 1,
            locations_status: "default_only".to_string(),
            roles_status: "configured".to_string(),
            team_status: "none".to_string(),
            talent_status: "finalized".to_string(),
            assignments_status: "none".to_string(),
            overall_status: "getting_started".to_string(),
            blocking_issues: json!([]),
            available_features: json!([]),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn echo_floors_touched_category() {
        let echo = optimistic_echo(&record(), ChangeKind::Team);
        assert_eq!(echo.team_status, "partial");
    }

    #[test]
    fn echo_never_downgrades() {
        // Talent is already finalized; a talent mutation must not pull it
        // back to partial.
        let echo = optimistic_echo(&record(), ChangeKind::Talent);
        assert_eq!(echo.talent_status, "finalized");
    }

    #[test]
    fn echo_leaves_other_categories_alone() {
        let echo = optimistic_echo(&record(), ChangeKind::Assignments);
        assert_eq!(echo.assignments_status, "partial");
        assert_eq!(echo.team_status, "none");
        assert_eq!(echo.locations_status, "default_only");
    }

    #[test]
    fn echo_floors_setup_categories_to_configured() {
        let echo = optimistic_echo(&record(), ChangeKind::Locations);
        assert_eq!(echo.locations_status, "configured");
    }

    #[test]
    fn status_change_echo_is_identity() {
        let base = record();
        let echo = optimistic_echo(&base, ChangeKind::Status);
        assert_eq!(echo.team_status, base.team_status);
        assert_eq!(echo.overall_status, base.overall_status);
    }

    #[test]
    fn echo_preserves_unparseable_status_strings() {
        let mut base = record();
        base.team_status = "garbage".to_string();
        let echo = optimistic_echo(&base, ChangeKind::Team);
        assert_eq!(echo.team_status, "garbage");
    }
}
