//! Request guards that reject before any database access.
//!
//! These run against a lazily-connecting pool, so no database is needed.

mod common;

use axum::http::StatusCode;
use common::{bearer, body_json, get, get_auth, lazy_pool, post_json_auth};

#[tokio::test]
async fn missing_authorization_is_401() {
    let app = common::build_test_app(lazy_pool());
    let response = get(app, "/api/v1/organisations").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_bearer_token_is_401() {
    let app = common::build_test_app(lazy_pool());
    let response = get_auth(app, "/api/v1/groups", "Bearer not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_scheme_is_401() {
    let app = common::build_test_app(lazy_pool());
    let response = get_auth(app, "/api/v1/groups", "Digest whatever").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn employee_cannot_create_organisation() {
    let app = common::build_test_app(lazy_pool());
    let body = serde_json::json!({ "name": "Acme", "director_id": 1 });
    let response =
        post_json_auth(app, "/api/v1/organisations", body, &bearer(2, "employee")).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[tokio::test]
async fn employee_cannot_list_users() {
    let app = common::build_test_app(lazy_pool());
    let response = get_auth(app, "/api/v1/users", &bearer(2, "employee")).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_status_kind_is_400() {
    let app = common::build_test_app(lazy_pool());
    let response = get_auth(app, "/api/v1/statuses/lunch", &bearer(1, "admin")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unknown_route_is_404_with_request_id() {
    let app = common::build_test_app(lazy_pool());
    let response = get(app, "/api/v1/does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key("x-request-id"));
}
