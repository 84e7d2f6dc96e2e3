//! HTTP-level integration tests for replacements, assignments and breaks.

mod common;

use axum::http::StatusCode;
use callhelper_db::models::user::User;
use common::{
    bearer, body_json, create_user, delete_auth, get_auth, post_json_auth, put_json_auth,
};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

/// Acme -> Support (min_active = 2) -> replacement on 2024-01-10 with a
/// 12:00-13:00 break window capped at 30 minutes.
struct Fixture {
    pool: PgPool,
    admin: String,
    organisation_id: i64,
    group_id: i64,
    replacement_id: i64,
}

impl Fixture {
    async fn new(pool: PgPool) -> Self {
        let director = create_user(&pool, "director", "admin").await;
        let admin = bearer(director.id, "admin");

        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/organisations",
            json!({ "name": "Acme", "director_id": director.id }),
            &admin,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let organisation_id = body_json(response).await["id"].as_i64().unwrap();

        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/groups",
            json!({
                "organisation_id": organisation_id,
                "name": "Support",
                "manager_id": director.id,
                "min_active": 2,
            }),
            &admin,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let group_id = body_json(response).await["id"].as_i64().unwrap();

        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/replacements",
            json!({
                "group_id": group_id,
                "date": "2024-01-10",
                "break_start": "12:00:00",
                "break_end": "13:00:00",
                "break_max_duration": 30,
            }),
            &admin,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let replacement_id = body_json(response).await["id"].as_i64().unwrap();

        Self {
            pool,
            admin,
            organisation_id,
            group_id,
            replacement_id,
        }
    }

    fn app(&self) -> axum::Router {
        common::build_test_app(self.pool.clone())
    }

    async fn employee(&self, username: &str) -> (User, String) {
        let user = create_user(&self.pool, username, "employee").await;
        let auth = bearer(user.id, "employee");
        (user, auth)
    }

    async fn assign(&self, employee_id: i64) -> axum::response::Response {
        post_json_auth(
            self.app(),
            &format!("/api/v1/replacements/{}/employees", self.replacement_id),
            json!({ "employee_id": employee_id }),
            &self.admin,
        )
        .await
    }

    async fn start_break(
        &self,
        employee_id: i64,
        at: &str,
        auth: &str,
    ) -> axum::response::Response {
        post_json_auth(
            self.app(),
            &format!("/api/v1/replacements/{}/breaks", self.replacement_id),
            json!({ "employee_id": employee_id, "break_start": at }),
            auth,
        )
        .await
    }

    async fn end_break(&self, break_id: i64, at: &str, auth: &str) -> axum::response::Response {
        post_json_auth(
            self.app(),
            &format!("/api/v1/breaks/{break_id}/end"),
            json!({ "break_end": at }),
            auth,
        )
        .await
    }
}

async fn id_of(response: axum::response::Response) -> i64 {
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Replacement scheduling
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_replacement_gets_first_active_status(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let response = get_auth(
        fx.app(),
        &format!("/api/v1/replacements/{}", fx.replacement_id),
        &fx.admin,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "planned");
    assert_eq!(json["group_id"], fx.group_id);
    assert_eq!(json["break_start"], "12:00:00");
    assert_eq!(json["employees"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replacement_with_inverted_window_is_rejected(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let response = post_json_auth(
        fx.app(),
        "/api/v1/replacements",
        json!({
            "group_id": fx.group_id,
            "date": "2024-01-11",
            "break_start": "13:00:00",
            "break_end": "12:00:00",
            "break_max_duration": 30,
        }),
        &fx.admin,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reschedule_revalidates_merged_window(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let uri = format!("/api/v1/replacements/{}", fx.replacement_id);

    let response =
        put_json_auth(fx.app(), &uri, json!({ "break_end": "11:00:00" }), &fx.admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response =
        put_json_auth(fx.app(), &uri, json!({ "break_end": "14:00:00" }), &fx.admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["break_end"], "14:00:00");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reschedule_must_keep_recorded_breaks_inside_window(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, e1_auth) = fx.employee("e1").await;
    fx.assign(e1.id).await;
    let break_id = id_of(fx.start_break(e1.id, "12:05:00", &e1_auth).await).await;
    fx.end_break(break_id, "12:25:00", &e1_auth).await;
    let uri = format!("/api/v1/replacements/{}", fx.replacement_id);

    let response = put_json_auth(
        fx.app(),
        &uri,
        json!({ "break_start": "14:00:00", "break_end": "15:00:00" }),
        &fx.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response =
        put_json_auth(fx.app(), &uri, json!({ "break_max_duration": 10 }), &fx.admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(get_auth(fx.app(), &uri, &fx.admin).await).await;
    assert_eq!(json["break_start"], "12:00:00");
    assert_eq!(json["break_max_duration"], 30);

    // A window that still covers the break is accepted.
    let response = put_json_auth(
        fx.app(),
        &uri,
        json!({ "break_start": "12:05:00", "break_max_duration": 20 }),
        &fx.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_transition_validates_target(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let uri = format!("/api/v1/replacements/{}/status", fx.replacement_id);

    let response = put_json_auth(fx.app(), &uri, json!({ "status": "ghost" }), &fx.admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_STATUS");

    let response = put_json_auth(fx.app(), &uri, json!({ "status": "active" }), &fx.admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "active");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replacements_filter_by_group_and_date(pool: PgPool) {
    let fx = Fixture::new(pool).await;

    let response = get_auth(
        fx.app(),
        &format!("/api/v1/replacements?group_id={}&date=2024-01-10", fx.group_id),
        &fx.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = get_auth(fx.app(), "/api/v1/replacements?date=2030-01-01", &fx.admin).await;
    assert_eq!(body_json(response).await["data"], json!([]));
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_assignment_is_409(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, _) = fx.employee("e1").await;

    assert_eq!(fx.assign(e1.id).await.status(), StatusCode::CREATED);

    let response = fx.assign(e1.id).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "DUPLICATE_ASSIGNMENT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn assigned_employees_are_listed_inline(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, _) = fx.employee("e1").await;
    fx.assign(e1.id).await;

    let response = get_auth(
        fx.app(),
        &format!("/api/v1/replacements/{}", fx.replacement_id),
        &fx.admin,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["employees"][0]["employee_id"], e1.id);
    assert_eq!(json["employees"][0]["status"], "planned");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unassign_is_refused_while_breaks_exist(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, e1_auth) = fx.employee("e1").await;
    let (e2, _) = fx.employee("e2").await;
    fx.assign(e1.id).await;
    fx.assign(e2.id).await;
    fx.start_break(e1.id, "12:05:00", &e1_auth).await;

    let base = format!("/api/v1/replacements/{}/employees", fx.replacement_id);

    let response = delete_auth(fx.app(), &format!("{base}/{}", e1.id), &fx.admin).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "REFERENTIAL_INTEGRITY");

    let response = delete_auth(fx.app(), &format!("{base}/{}", e2.id), &fx.admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(fx.app(), &format!("{base}/{}", e2.id), &fx.admin).await;
    assert_eq!(body_json(response).await["code"], "NOT_ASSIGNED");
}

// ---------------------------------------------------------------------------
// Breaks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn break_from_1205_to_1225_lasts_20_minutes(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, e1_auth) = fx.employee("e1").await;
    fx.assign(e1.id).await;

    let response = fx.start_break(e1.id, "12:05:00", &e1_auth).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let started = body_json(response).await;
    assert_eq!(started["status"], "on_break");
    assert!(started["break_end"].is_null());
    assert!(started["duration"].is_null());

    let break_id = started["id"].as_i64().unwrap();
    let response = fx.end_break(break_id, "12:25:00", &e1_auth).await;
    assert_eq!(response.status(), StatusCode::OK);
    let ended = body_json(response).await;
    assert_eq!(ended["duration"], 20);
    assert_eq!(ended["break_end"], "12:25:00");
    assert_eq!(ended["status"], "finished");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn break_status_follows_dictionary_order(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, e1_auth) = fx.employee("e1").await;
    fx.assign(e1.id).await;

    let response = post_json_auth(
        fx.app(),
        "/api/v1/statuses/break/on_break/deactivate",
        json!({}),
        &fx.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let started = body_json(fx.start_break(e1.id, "12:05:00", &e1_auth).await).await;
    assert_eq!(started["status"], "finished");

    // An explicit status wins on both ends.
    let break_id = started["id"].as_i64().unwrap();
    let response = post_json_auth(
        fx.app(),
        &format!("/api/v1/breaks/{break_id}/end"),
        json!({ "break_end": "12:15:00", "status": "pending" }),
        &e1_auth,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "pending");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn end_before_start_is_invalid_interval(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, e1_auth) = fx.employee("e1").await;
    fx.assign(e1.id).await;
    let break_id = id_of(fx.start_break(e1.id, "12:25:00", &e1_auth).await).await;

    let response = fx.end_break(break_id, "12:05:00", &e1_auth).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_INTERVAL");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn break_longer_than_cap_is_rejected(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, e1_auth) = fx.employee("e1").await;
    fx.assign(e1.id).await;
    let break_id = id_of(fx.start_break(e1.id, "12:00:00", &e1_auth).await).await;

    let response = fx.end_break(break_id, "12:31:00", &e1_auth).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn break_outside_window_is_rejected(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, e1_auth) = fx.employee("e1").await;
    fx.assign(e1.id).await;

    let response = fx.start_break(e1.id, "11:30:00", &e1_auth).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unassigned_employee_cannot_start_break(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, e1_auth) = fx.employee("e1").await;

    let response = fx.start_break(e1.id, "12:05:00", &e1_auth).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "NOT_ASSIGNED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_open_break_is_rejected(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, e1_auth) = fx.employee("e1").await;
    fx.assign(e1.id).await;
    fx.start_break(e1.id, "12:05:00", &e1_auth).await;

    let response = fx.start_break(e1.id, "12:10:00", &e1_auth).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ended_break_cannot_end_again(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, e1_auth) = fx.employee("e1").await;
    fx.assign(e1.id).await;
    let break_id = id_of(fx.start_break(e1.id, "12:05:00", &e1_auth).await).await;
    fx.end_break(break_id, "12:15:00", &e1_auth).await;

    let response = fx.end_break(break_id, "12:20:00", &e1_auth).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn employee_cannot_manage_another_employees_break(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, e1_auth) = fx.employee("e1").await;
    let (e2, e2_auth) = fx.employee("e2").await;
    fx.assign(e1.id).await;
    fx.assign(e2.id).await;

    let response = fx.start_break(e1.id, "12:05:00", &e2_auth).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let break_id = id_of(fx.start_break(e1.id, "12:05:00", &e1_auth).await).await;
    let response = fx.end_break(break_id, "12:15:00", &e2_auth).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = fx.end_break(break_id, "12:15:00", &fx.admin).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn break_status_must_be_active(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, e1_auth) = fx.employee("e1").await;
    fx.assign(e1.id).await;
    let break_id = id_of(fx.start_break(e1.id, "12:05:00", &e1_auth).await).await;
    let uri = format!("/api/v1/breaks/{break_id}/status");

    let response = post_json_auth(
        fx.app(),
        "/api/v1/statuses/break/cancelled/deactivate",
        json!({}),
        &fx.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response =
        put_json_auth(fx.app(), &uri, json!({ "status": "cancelled" }), &e1_auth).await;
    assert_eq!(body_json(response).await["code"], "INVALID_STATUS");

    let response =
        put_json_auth(fx.app(), &uri, json!({ "status": "on_break" }), &e1_auth).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "on_break");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn breaks_list_filters_by_employee(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, e1_auth) = fx.employee("e1").await;
    let (e2, e2_auth) = fx.employee("e2").await;
    fx.assign(e1.id).await;
    fx.assign(e2.id).await;
    fx.start_break(e1.id, "12:05:00", &e1_auth).await;
    fx.start_break(e2.id, "12:10:00", &e2_auth).await;

    let response = get_auth(
        fx.app(),
        &format!("/api/v1/breaks?employee_id={}", e2.id),
        &fx.admin,
    )
    .await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data.as_array().unwrap().len(), 1);
    assert_eq!(data[0]["employee_id"], e2.id);

    let response = get_auth(
        fx.app(),
        &format!("/api/v1/replacements/{}/breaks", fx.replacement_id),
        &fx.admin,
    )
    .await;
    let data: Value = body_json(response).await["data"].clone();
    let starts: Vec<&str> = data
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["break_start"].as_str().unwrap())
        .collect();
    assert_eq!(starts, vec!["12:05:00", "12:10:00"]);
}

// ---------------------------------------------------------------------------
// Staffing and cascades
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn staffing_reports_below_minimum(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, e1_auth) = fx.employee("e1").await;
    let (e2, _) = fx.employee("e2").await;
    fx.assign(e1.id).await;
    fx.assign(e2.id).await;
    let uri = format!("/api/v1/replacements/{}/staffing", fx.replacement_id);

    let json = body_json(get_auth(fx.app(), &uri, &fx.admin).await).await;
    assert_eq!(json["on_duty"], 2);
    assert_eq!(json["below_minimum"], false);

    // Allowed even though it drops the shift under min_active.
    let response = fx.start_break(e1.id, "12:05:00", &e1_auth).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get_auth(fx.app(), &uri, &fx.admin).await).await;
    assert_eq!(json["on_break"], 1);
    assert_eq!(json["on_duty"], 1);
    assert_eq!(json["below_minimum"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_organisation_cascades_to_replacements(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (e1, e1_auth) = fx.employee("e1").await;
    fx.assign(e1.id).await;
    let break_id = id_of(fx.start_break(e1.id, "12:05:00", &e1_auth).await).await;

    let response = delete_auth(
        fx.app(),
        &format!("/api/v1/organisations/{}", fx.organisation_id),
        &fx.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        fx.app(),
        &format!("/api/v1/replacements/{}", fx.replacement_id),
        &fx.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(fx.app(), &format!("/api/v1/breaks/{break_id}"), &fx.admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn negative_min_active_is_rejected(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let response = put_json_auth(
        fx.app(),
        &format!("/api/v1/groups/{}", fx.group_id),
        json!({ "min_active": -1 }),
        &fx.admin,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_director_is_not_found(pool: PgPool) {
    let fx = Fixture::new(pool).await;

    let response = post_json_auth(
        fx.app(),
        "/api/v1/organisations",
        json!({ "name": "Ghost Corp", "director_id": 999_999 }),
        &fx.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let response = put_json_auth(
        fx.app(),
        &format!("/api/v1/organisations/{}", fx.organisation_id),
        json!({ "director_id": 999_999 }),
        &fx.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_manager_is_not_found(pool: PgPool) {
    let fx = Fixture::new(pool).await;

    let response = post_json_auth(
        fx.app(),
        "/api/v1/groups",
        json!({
            "organisation_id": fx.organisation_id,
            "name": "Nights",
            "manager_id": 999_999,
        }),
        &fx.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let response = put_json_auth(
        fx.app(),
        &format!("/api/v1/groups/{}", fx.group_id),
        json!({ "manager_id": 999_999 }),
        &fx.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let response = get_auth(fx.app(), &format!("/api/v1/groups/{}", fx.group_id), &fx.admin).await;
    assert_ne!(body_json(response).await["manager_id"], 999_999);
}
