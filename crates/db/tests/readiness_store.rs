//! Integration tests for the readiness store.
//!
//! Exercises the last-write-wins upsert guard, initial record insertion,
//! and cascade delete behaviour against a real database.

use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::PgPool;

use callsheet_core::readiness::{self, ConfigurationSnapshot};
use callsheet_core::staffing::StaffBreakdown;
use callsheet_core::types::{DbId, Timestamp};
use callsheet_db::models::project::CreateProject;
use callsheet_db::models::readiness_record::UpsertReadinessRecord;
use callsheet_db::repositories::{ProjectRepo, ReadinessRecordRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        start_date: "2026-03-10".parse().unwrap(),
        end_date: "2026-03-14".parse().unwrap(),
    }
}

fn record_input(project_id: DbId, overall: &str, last_updated: Timestamp) -> UpsertReadinessRecord {
    UpsertReadinessRecord {
        project_id,
        locations_status: "default_only".to_string(),
        roles_status: "default_only".to_string(),
        team_status: "none".to_string(),
        talent_status: "none".to_string(),
        assignments_status: "none".to_string(),
        overall_status: overall.to_string(),
        blocking_issues: json!(["No staff assigned to the team yet"]),
        available_features: json!([]),
        last_updated,
    }
}

async fn create_project(pool: &PgPool, name: &str) -> DbId {
    ProjectRepo::create(pool, &new_project(name)).await.unwrap().id
}

// ---------------------------------------------------------------------------
// Test: upsert inserts when no record exists
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn upsert_inserts_when_missing(pool: PgPool) {
    let project_id = create_project(&pool, "Store Insert").await;

    let stored = ReadinessRecordRepo::upsert(
        &pool,
        &record_input(project_id, "getting_started", Utc::now()),
    )
    .await
    .unwrap();

    let record = stored.expect("fresh upsert must be stored");
    assert_eq!(record.project_id, project_id);
    assert_eq!(record.overall_status, "getting_started");
    assert_eq!(record.team_status, "none");
}

// ---------------------------------------------------------------------------
// Test: stale writes are silently discarded
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn stale_write_is_discarded(pool: PgPool) {
    let project_id = create_project(&pool, "Store Stale").await;
    let now = Utc::now();

    ReadinessRecordRepo::upsert(&pool, &record_input(project_id, "operational", now))
        .await
        .unwrap()
        .expect("first write stored");

    // A recomputation that started earlier must not overwrite the result
    // computed from newer mutations.
    let stale = ReadinessRecordRepo::upsert(
        &pool,
        &record_input(project_id, "getting_started", now - Duration::seconds(5)),
    )
    .await
    .unwrap();
    assert!(stale.is_none(), "stale write must be rejected by the guard");

    let stored = ReadinessRecordRepo::find_by_project_id(&pool, project_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.overall_status, "operational");
}

// ---------------------------------------------------------------------------
// Test: newer writes supersede
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn newer_write_supersedes(pool: PgPool) {
    let project_id = create_project(&pool, "Store Newer").await;
    let now = Utc::now();

    ReadinessRecordRepo::upsert(&pool, &record_input(project_id, "getting_started", now))
        .await
        .unwrap()
        .expect("first write stored");

    let newer = ReadinessRecordRepo::upsert(
        &pool,
        &record_input(project_id, "operational", now + Duration::seconds(5)),
    )
    .await
    .unwrap();
    assert!(newer.is_some());

    let stored = ReadinessRecordRepo::find_by_project_id(&pool, project_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.overall_status, "operational");
}

// ---------------------------------------------------------------------------
// Test: equal timestamps are accepted (not-older guard)
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn equal_timestamp_write_is_accepted(pool: PgPool) {
    let project_id = create_project(&pool, "Store Equal").await;
    let now = Utc::now();

    ReadinessRecordRepo::upsert(&pool, &record_input(project_id, "getting_started", now))
        .await
        .unwrap()
        .expect("first write stored");

    let same = ReadinessRecordRepo::upsert(&pool, &record_input(project_id, "operational", now))
        .await
        .unwrap();
    assert!(same.is_some(), "a write at the same instant is not older");
}

// ---------------------------------------------------------------------------
// Test: insert_initial does nothing when a record exists
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn insert_initial_is_noop_on_existing_record(pool: PgPool) {
    let project_id = create_project(&pool, "Store Initial").await;
    let now = Utc::now();

    ReadinessRecordRepo::upsert(&pool, &record_input(project_id, "operational", now))
        .await
        .unwrap()
        .expect("first write stored");

    let initial = ReadinessRecordRepo::insert_initial(
        &pool,
        &record_input(project_id, "getting_started", now + Duration::seconds(5)),
    )
    .await
    .unwrap();
    assert!(initial.is_none(), "insert_initial must not clobber");

    let stored = ReadinessRecordRepo::find_by_project_id(&pool, project_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.overall_status, "operational");
}

// ---------------------------------------------------------------------------
// Test: readiness record cascades with project deletion
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn record_cascades_with_project_delete(pool: PgPool) {
    let project_id = create_project(&pool, "Store Cascade").await;

    ReadinessRecordRepo::upsert(
        &pool,
        &record_input(project_id, "getting_started", Utc::now()),
    )
    .await
    .unwrap()
    .expect("write stored");

    assert!(ProjectRepo::delete(&pool, project_id).await.unwrap());

    let stored = ReadinessRecordRepo::find_by_project_id(&pool, project_id)
        .await
        .unwrap();
    assert!(stored.is_none());
}

// ---------------------------------------------------------------------------
// Test: an aggregator assessment round-trips through the store
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn assessment_round_trips_through_store(pool: PgPool) {
    let project_id = create_project(&pool, "Store Assessment").await;

    let snapshot = ConfigurationSnapshot {
        location_count: 3,
        has_only_default_locations: true,
        locations_finalized: false,
        role_template_count: 3,
        has_only_default_roles: true,
        roles_finalized: false,
        staff_count: 2,
        staff_breakdown: StaffBreakdown {
            supervisors: 0,
            coordinators: 1,
            escorts: 1,
        },
        team_finalized: false,
        talent_count: 3,
        talent_finalized: false,
        total_possible_assignments: 15,
        completed_assignments: 0,
        assignments_closed_out: false,
    };
    let assessment = readiness::evaluate_snapshot(&snapshot).unwrap();
    let input = UpsertReadinessRecord::from_assessment(project_id, &assessment, Utc::now());

    let stored = ReadinessRecordRepo::upsert(&pool, &input)
        .await
        .unwrap()
        .expect("write stored");

    assert_eq!(stored.overall_status, "operational");
    assert_eq!(stored.team_status, "partial");
    assert_eq!(stored.talent_status, "partial");
    assert_eq!(stored.assignments_status, "none");
    let issues = stored.blocking_issues.as_array().unwrap();
    assert!(issues
        .iter()
        .any(|i| i.as_str() == Some("No escort assignments yet")));
}
