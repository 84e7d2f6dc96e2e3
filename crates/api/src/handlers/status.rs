//! Handlers for the `/statuses/{kind}` dictionaries.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use callhelper_core::error::CoreError;
use callhelper_core::status::StatusKind;
use callhelper_db::models::status::{CreateStatus, StatusDefinition, UpdateStatus};
use callhelper_db::repositories::StatusRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::statuses::{self, status_entity};

fn parse_kind(kind: &str) -> AppResult<StatusKind> {
    Ok(kind.parse::<StatusKind>()?)
}

fn not_found(kind: StatusKind, code: &str) -> AppError {
    AppError::Core(CoreError::CodeNotFound {
        entity: status_entity(kind),
        code: code.to_string(),
    })
}

/// GET /api/v1/statuses/{kind}
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(kind): Path<String>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<StatusDefinition>>>> {
    let kind = parse_kind(&kind)?;
    let items = StatusRepo::list(&state.pool, kind, params.include_inactive).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/statuses/{kind}/{code}
pub async fn get_by_code(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((kind, code)): Path<(String, String)>,
) -> AppResult<Json<StatusDefinition>> {
    let kind = parse_kind(&kind)?;
    let status = StatusRepo::find(&state.pool, kind, &code)
        .await?
        .ok_or_else(|| not_found(kind, &code))?;
    Ok(Json(status))
}

/// POST /api/v1/statuses/{kind}
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(kind): Path<String>,
    Json(input): Json<CreateStatus>,
) -> AppResult<(StatusCode, Json<StatusDefinition>)> {
    let kind = parse_kind(&kind)?;
    let status = statuses::create_status(&state.pool, kind, &input).await?;
    Ok((StatusCode::CREATED, Json(status)))
}

/// PUT /api/v1/statuses/{kind}/{code}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((kind, code)): Path<(String, String)>,
    Json(input): Json<UpdateStatus>,
) -> AppResult<Json<StatusDefinition>> {
    let kind = parse_kind(&kind)?;
    input.validate()?;
    let status = StatusRepo::update(&state.pool, kind, &code, &input)
        .await?
        .ok_or_else(|| not_found(kind, &code))?;
    Ok(Json(status))
}

/// POST /api/v1/statuses/{kind}/{code}/deactivate
///
/// Idempotent: deactivating an inactive status succeeds.
pub async fn deactivate(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((kind, code)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let kind = parse_kind(&kind)?;
    if StatusRepo::find(&state.pool, kind, &code).await?.is_none() {
        return Err(not_found(kind, &code));
    }
    if StatusRepo::deactivate(&state.pool, kind, &code).await? {
        tracing::info!(kind = %kind, code = %code, "Status deactivated");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/statuses/{kind}/{code}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((kind, code)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let kind = parse_kind(&kind)?;
    statuses::delete_status(&state.pool, kind, &code).await?;
    Ok(StatusCode::NO_CONTENT)
}
