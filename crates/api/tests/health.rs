//! Integration tests for the health check endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, lazy_pool};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_reports_database(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[tokio::test]
async fn health_check_degrades_without_database() {
    let response = get(common::build_test_app(lazy_pool()), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

#[tokio::test]
async fn response_carries_request_id() {
    let response = get(common::build_test_app(lazy_pool()), "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header must be set");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}
