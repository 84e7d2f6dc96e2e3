//! Handlers for the `/replacements` resource and its nested employees and breaks.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use callhelper_core::error::CoreError;
use callhelper_core::staffing::StaffingSummary;
use callhelper_core::types::DbId;
use callhelper_db::models::break_record::{Break, BreakFilter, StartBreak};
use callhelper_db::models::replacement::{
    CreateReplacement, Replacement, ReplacementFilter, ReplacementWithEmployees,
    UpdateReplacement,
};
use callhelper_db::models::replacement_employee::{AssignEmployee, ReplacementEmployee};
use callhelper_db::repositories::{clamp_limit, clamp_offset, BreakRepo, ReplacementRepo};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::{breaks, replacements};

/// Query parameters for `GET /replacements`.
#[derive(Debug, Deserialize)]
pub struct ReplacementListParams {
    pub group_id: Option<DbId>,
    pub date: Option<NaiveDate>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for status transitions.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Replacement",
        id,
    })
}

/// POST /api/v1/replacements
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateReplacement>,
) -> AppResult<(StatusCode, Json<Replacement>)> {
    let replacement = replacements::create_replacement(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(replacement)))
}

/// GET /api/v1/replacements
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ReplacementListParams>,
) -> AppResult<Json<DataResponse<Vec<Replacement>>>> {
    let filter = ReplacementFilter {
        group_id: params.group_id,
        date: params.date,
        status: params.status,
    };
    let items = ReplacementRepo::list(
        &state.pool,
        &filter,
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/replacements/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ReplacementWithEmployees>> {
    let replacement = ReplacementRepo::find_with_employees(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(replacement))
}

/// PUT /api/v1/replacements/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReplacement>,
) -> AppResult<Json<Replacement>> {
    let replacement = replacements::update_replacement(&state.pool, id, &input).await?;
    Ok(Json(replacement))
}

/// DELETE /api/v1/replacements/{id}
///
/// Cascades to assignments and breaks.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ReplacementRepo::delete(&state.pool, id).await? {
        tracing::info!(replacement_id = id, "Replacement deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// PUT /api/v1/replacements/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<Replacement>> {
    let replacement = replacements::transition_status(&state.pool, id, &input.status).await?;
    Ok(Json(replacement))
}

/// GET /api/v1/replacements/{id}/staffing
pub async fn staffing(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<StaffingSummary>> {
    Ok(Json(replacements::staffing(&state.pool, id).await?))
}

/// POST /api/v1/replacements/{id}/employees
pub async fn assign_employee(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<AssignEmployee>,
) -> AppResult<(StatusCode, Json<ReplacementEmployee>)> {
    let assignment = replacements::assign_employee(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// PUT /api/v1/replacements/{id}/employees/{employee_id}/status
pub async fn set_employee_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((id, employee_id)): Path<(DbId, DbId)>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<ReplacementEmployee>> {
    let assignment =
        replacements::set_employee_status(&state.pool, id, employee_id, &input.status).await?;
    Ok(Json(assignment))
}

/// DELETE /api/v1/replacements/{id}/employees/{employee_id}
pub async fn unassign_employee(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((id, employee_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    replacements::unassign_employee(&state.pool, id, employee_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/replacements/{id}/breaks
pub async fn list_breaks(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Break>>>> {
    ReplacementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let filter = BreakFilter {
        replacement_id: Some(id),
        employee_id: None,
    };
    let items = BreakRepo::list(
        &state.pool,
        &filter,
        clamp_limit(page.limit),
        clamp_offset(page.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/replacements/{id}/breaks
///
/// Employees may only start their own breaks.
pub async fn start_break(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<StartBreak>,
) -> AppResult<(StatusCode, Json<Break>)> {
    let record = breaks::start_break(&state.pool, &user, id, &input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
