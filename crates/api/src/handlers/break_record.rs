//! Handlers for the `/breaks` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use callhelper_core::error::CoreError;
use callhelper_core::types::DbId;
use callhelper_db::models::break_record::{Break, BreakFilter, EndBreak};
use callhelper_db::repositories::{clamp_limit, clamp_offset, BreakRepo};
use serde::Deserialize;

use super::replacement::SetStatusRequest;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::breaks;

/// Query parameters for `GET /breaks`.
#[derive(Debug, Deserialize)]
pub struct BreakListParams {
    pub replacement_id: Option<DbId>,
    pub employee_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Break", id })
}

/// GET /api/v1/breaks
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<BreakListParams>,
) -> AppResult<Json<DataResponse<Vec<Break>>>> {
    let filter = BreakFilter {
        replacement_id: params.replacement_id,
        employee_id: params.employee_id,
    };
    let items = BreakRepo::list(
        &state.pool,
        &filter,
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/breaks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Break>> {
    let record = BreakRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(record))
}

/// POST /api/v1/breaks/{id}/end
pub async fn end(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<EndBreak>,
) -> AppResult<Json<Break>> {
    let record = breaks::end_break(&state.pool, &user, id, &input).await?;
    Ok(Json(record))
}

/// PUT /api/v1/breaks/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<Break>> {
    let record = breaks::set_break_status(&state.pool, &user, id, &input.status).await?;
    Ok(Json(record))
}

/// DELETE /api/v1/breaks/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if BreakRepo::delete(&state.pool, id).await? {
        tracing::info!(break_id = id, "Break deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
