//! HTTP-level integration tests for the repair endpoints, centred on the
//! status transition envelope.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use sqlx::PgPool;

/// Create a customer over HTTP and return its id.
async fn seed_customer(pool: &PgPool) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/customers",
        serde_json::json!({"name": "张三", "phone": "13800000001"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a repair over HTTP and return its id.
async fn seed_repair(pool: &PgPool, customer_id: i64) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/repairs",
        serde_json::json!({
            "customer_id": customer_id,
            "phone": "iPhone 13",
            "problems": ["cracked screen"],
            "deposit_cents": 5000,
            "price_cents": 45000,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// POST a status transition and return the `{status, message}` envelope.
async fn transition(pool: &PgPool, repair_id: i64, new_status: &str) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/repairs/{repair_id}/status"),
        serde_json::json!({"new_status": new_status}),
    )
    .await;
    // The transition endpoint always answers 200; the envelope carries
    // success or error.
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Ticket creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_repair_starts_pending_with_ticket_number(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/repairs",
        serde_json::json!({
            "customer_id": customer_id,
            "phone": "Pixel 8",
            "problems": ["battery drain", "no charge"],
            "deposit_cents": 0,
            "price_cents": 30000,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["is_rework"], false);
    let ticket_no = json["data"]["ticket_no"].as_str().unwrap();
    assert!(ticket_no.starts_with("RT-"), "got ticket {ticket_no}");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_repair_for_unknown_customer_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/repairs",
        serde_json::json!({
            "customer_id": 999999,
            "phone": "Pixel 8",
            "problems": ["battery drain"],
            "deposit_cents": 0,
            "price_cents": 30000,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_repair_rejects_empty_problem_list(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/repairs",
        serde_json::json!({
            "customer_id": customer_id,
            "phone": "Pixel 8",
            "problems": [],
            "deposit_cents": 0,
            "price_cents": 30000,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_repairs_rejects_unknown_status_filter(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    seed_repair(&pool, customer_id).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/repairs?status=fixed").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A known wire token filters normally.
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/repairs?status=pending").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Status transition envelope
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn plain_transition_reports_display_label(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let repair_id = seed_repair(&pool, customer_id).await;

    let envelope = transition(&pool, repair_id, "repairing").await;
    assert_eq!(envelope["status"], "success");
    let message = envelope["message"].as_str().unwrap();
    assert!(message.contains("维修中"), "got message {message}");

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/repairs/{repair_id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "repairing");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn first_pickup_issues_warranty_and_points_to_warranty_section(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let repair_id = seed_repair(&pool, customer_id).await;

    transition(&pool, repair_id, "repaired").await;
    let envelope = transition(&pool, repair_id, "picked_up").await;
    assert_eq!(envelope["status"], "success");
    let message = envelope["message"].as_str().unwrap();
    assert!(message.contains("warranty section"), "got message {message}");

    // The warranty is now retrievable through the repair.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/repairs/{repair_id}/warranty")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let warranty_id = json["data"]["id"].as_str().unwrap();
    assert!(warranty_id.starts_with("WTY-"), "got id {warranty_id}");
    assert_eq!(json["data"]["rework_count"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn second_pickup_is_rejected_in_envelope(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let repair_id = seed_repair(&pool, customer_id).await;

    transition(&pool, repair_id, "picked_up").await;
    // Move away and pick up again: the repair is no longer under rework and
    // already has a warranty, so a second issuance must be refused.
    transition(&pool, repair_id, "repaired").await;
    let envelope = transition(&pool, repair_id, "picked_up").await;

    assert_eq!(envelope["status"], "error");
    let message = envelope["message"].as_str().unwrap();
    assert!(message.contains("already issued"), "got message {message}");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rework_status_rejected_outside_rework(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let repair_id = seed_repair(&pool, customer_id).await;

    let envelope = transition(&pool, repair_id, "reworking").await;
    assert_eq!(envelope["status"], "error");
    let message = envelope["message"].as_str().unwrap();
    assert!(message.contains("warranty rework"), "got message {message}");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn transition_on_missing_repair_reports_error(pool: PgPool) {
    let envelope = transition(&pool, 999999, "repairing").await;
    assert_eq!(envelope["status"], "error");
    let message = envelope["message"].as_str().unwrap();
    assert!(message.contains("not found"), "got message {message}");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_status_token_returns_422(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let repair_id = seed_repair(&pool, customer_id).await;

    // "picked-up" is not a valid wire token; deserialization fails before
    // the handler runs, so this is a plain axum rejection, not an envelope.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/repairs/{repair_id}/status"),
        serde_json::json!({"new_status": "picked-up"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Full rework cycle over HTTP
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn warranty_rework_cycle_round_trips(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let repair_id = seed_repair(&pool, customer_id).await;

    transition(&pool, repair_id, "picked_up").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/repairs/{repair_id}/warranty")).await;
    let warranty_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Customer returns under warranty.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/warranties/{warranty_id}/rework"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_rework"], true);

    // Starting a second rework while one is open conflicts.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/warranties/{warranty_id}/rework"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Pickup closes the cycle and bumps the counter.
    transition(&pool, repair_id, "reworked").await;
    let envelope = transition(&pool, repair_id, "picked_up").await;
    assert_eq!(envelope["status"], "success");
    let message = envelope["message"].as_str().unwrap();
    assert!(message.contains("rework is complete"), "got message {message}");

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/warranties/{warranty_id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_rework"], false);
    assert_eq!(json["data"]["rework_count"], 1);
}
