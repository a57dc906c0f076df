//! Integration tests for the readiness engine over HTTP.
//!
//! Drives the full path: configuration source mutations -> invalidation
//! coordinator -> snapshot loader -> aggregator -> readiness store ->
//! readiness endpoints. Assertions about derived state go through the
//! synchronous refresh endpoint so they never race the debounced
//! background recomputation.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_project, delete, get, post_empty, post_json};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn add_member(pool: &PgPool, project_id: i64, name: &str, category: &str) -> i64 {
    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/team"),
        json!({ "person_name": name, "role_category": category }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn add_talent(pool: &PgPool, project_id: i64, name: &str) -> i64 {
    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/talent"),
        json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Force a fresh recomputation and return the readiness payload.
async fn refresh(pool: &PgPool, project_id: i64) -> Value {
    let response = post_empty(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/readiness/refresh"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

fn issues(data: &Value) -> Vec<String> {
    data["blocking_issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

fn features(data: &Value) -> Vec<String> {
    data["available_features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Test: a brand-new project has an empty-state readiness record
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn new_project_starts_at_getting_started(pool: PgPool) {
    let project_id = create_project(&pool, "Night Shoot").await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/readiness"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["overall_status"], "getting_started");
    assert_eq!(data["locations_status"], "default_only");
    assert_eq!(data["roles_status"], "default_only");
    assert_eq!(data["team_status"], "none");
    assert_eq!(data["talent_status"], "none");
    assert_eq!(data["assignments_status"], "none");
    assert!(!issues(&data).is_empty());
    assert!(features(&data).is_empty());
}

// ---------------------------------------------------------------------------
// Test: readiness for an unknown project is 404, never fabricated
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_project_readiness_is_404(pool: PgPool) {
    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/projects/999999/readiness",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_empty(
        common::build_test_app(pool.clone()),
        "/api/v1/projects/999999/readiness/refresh",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: staffing and roster alone reach operational
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn team_and_talent_reach_operational_despite_defaults(pool: PgPool) {
    let project_id = create_project(&pool, "Prep Week").await;

    add_member(&pool, project_id, "Ada", "coordinator").await;
    add_member(&pool, project_id, "Grace", "escort").await;
    add_talent(&pool, project_id, "Headliner").await;
    add_talent(&pool, project_id, "Opener").await;
    add_talent(&pool, project_id, "Band").await;

    let data = refresh(&pool, project_id).await;
    assert_eq!(data["locations_status"], "default_only");
    assert_eq!(data["roles_status"], "default_only");
    assert_eq!(data["team_status"], "partial");
    assert_eq!(data["talent_status"], "partial");
    assert_eq!(data["assignments_status"], "none");
    assert_eq!(data["overall_status"], "operational");

    // 3 talent entities x 5 days with no escorts assigned yet.
    assert!(issues(&data).contains(&"No escort assignments yet".to_string()));

    let unlocked = features(&data);
    assert!(unlocked.contains(&"time_tracking".to_string()));
    assert!(unlocked.contains(&"escort_assignment".to_string()));
    assert!(unlocked.contains(&"daily_operations".to_string()));
    assert!(!unlocked.contains(&"wrap_reports".to_string()));
}

// ---------------------------------------------------------------------------
// Test: full lifecycle up to production_ready
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn finalizing_everything_reaches_production_ready(pool: PgPool) {
    let project_id = create_project(&pool, "Festival Main Stage").await;

    add_member(&pool, project_id, "Ada", "coordinator").await;
    let escort_id = add_member(&pool, project_id, "Grace", "escort").await;
    let talent_ids = vec![
        add_talent(&pool, project_id, "Headliner").await,
        add_talent(&pool, project_id, "Opener").await,
        add_talent(&pool, project_id, "Band").await,
    ];

    // Cover every talent-day slot: 3 entities x 5 shooting days.
    for talent_id in &talent_ids {
        for day in 10..=14 {
            let response = post_json(
                common::build_test_app(pool.clone()),
                &format!("/api/v1/projects/{project_id}/daily-assignments"),
                json!({
                    "talent_id": talent_id,
                    "day": format!("2026-03-{day:02}"),
                    "escort_assignment_id": escort_id,
                }),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    // Fully covered but not closed out: current, not complete.
    let data = refresh(&pool, project_id).await;
    assert_eq!(data["assignments_status"], "current");
    assert_ne!(data["overall_status"], "production_ready");

    // Close out the grid and finalize the other four categories.
    for path in [
        "daily-assignments/close-out",
        "locations/finalize",
        "role-templates/finalize",
        "team/finalize",
        "talent/finalize",
    ] {
        let response = post_empty(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/projects/{project_id}/{path}"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "failed: {path}");
    }

    let data = refresh(&pool, project_id).await;
    assert_eq!(data["locations_status"], "finalized");
    assert_eq!(data["roles_status"], "finalized");
    assert_eq!(data["team_status"], "finalized");
    assert_eq!(data["talent_status"], "finalized");
    assert_eq!(data["assignments_status"], "complete");
    assert_eq!(data["overall_status"], "production_ready");
    assert!(issues(&data).is_empty());
    assert!(features(&data).contains(&"wrap_reports".to_string()));
}

// ---------------------------------------------------------------------------
// Test: close-out is refused while slots are uncovered
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn close_out_refused_with_uncovered_slots(pool: PgPool) {
    let project_id = create_project(&pool, "Half Staffed").await;
    let escort_id = add_member(&pool, project_id, "Grace", "escort").await;
    let talent_id = add_talent(&pool, project_id, "Headliner").await;

    // Cover one slot out of five.
    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/daily-assignments"),
        json!({
            "talent_id": talent_id,
            "day": "2026-03-10",
            "escort_assignment_id": escort_id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_empty(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/daily-assignments/close-out"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Test: assignment validation rejects out-of-range days and non-escorts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn assignment_upsert_validates_day_and_escort(pool: PgPool) {
    let project_id = create_project(&pool, "Validation").await;
    let coordinator_id = add_member(&pool, project_id, "Ada", "coordinator").await;
    let escort_id = add_member(&pool, project_id, "Grace", "escort").await;
    let talent_id = add_talent(&pool, project_id, "Headliner").await;

    // Day outside the project range.
    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/daily-assignments"),
        json!({
            "talent_id": talent_id,
            "day": "2026-04-01",
            "escort_assignment_id": escort_id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A coordinator cannot cover a talent day.
    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/daily-assignments"),
        json!({
            "talent_id": talent_id,
            "day": "2026-03-10",
            "escort_assignment_id": coordinator_id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Talent from another project is invisible here.
    let other_project = create_project(&pool, "Other").await;
    let foreign_talent = add_talent(&pool, other_project, "Stranger").await;
    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/daily-assignments"),
        json!({
            "talent_id": foreign_talent,
            "day": "2026-03-10",
            "escort_assignment_id": escort_id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: activation is gated on a guaranteed-fresh operational verdict
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn activation_requires_operational_readiness(pool: PgPool) {
    let project_id = create_project(&pool, "Gate Check").await;

    // Nothing configured: activation must be refused.
    let response = post_empty(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/activate"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    add_member(&pool, project_id, "Grace", "escort").await;
    add_talent(&pool, project_id, "Headliner").await;

    let response = post_empty(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/activate"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let project = body_json(response).await["data"].clone();
    assert_eq!(project["status"], "active");

    // Forward-only lifecycle: activating twice is a conflict.
    let response = post_empty(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/activate"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Test: duplicate team member maps to 409
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_team_member_is_conflict(pool: PgPool) {
    let project_id = create_project(&pool, "Duplicates").await;
    add_member(&pool, project_id, "Grace", "escort").await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/team"),
        json!({ "person_name": "Grace", "role_category": "escort" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Test: deleting a project cascades its readiness record
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn project_delete_cascades_readiness(pool: PgPool) {
    let project_id = create_project(&pool, "Short Lived").await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/readiness"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: refresh reflects deletions (derived state converges downward too)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_reflects_roster_removal(pool: PgPool) {
    let project_id = create_project(&pool, "Shrinking").await;
    add_member(&pool, project_id, "Grace", "escort").await;
    let talent_id = add_talent(&pool, project_id, "Headliner").await;

    let data = refresh(&pool, project_id).await;
    assert_eq!(data["overall_status"], "operational");

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/talent/{talent_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let data = refresh(&pool, project_id).await;
    assert_eq!(data["talent_status"], "none");
    assert_eq!(data["overall_status"], "getting_started");
}
