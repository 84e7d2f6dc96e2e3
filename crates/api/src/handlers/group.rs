//! Handlers for the `/groups` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use callhelper_core::error::CoreError;
use callhelper_core::staffing::validate_min_active;
use callhelper_core::types::DbId;
use callhelper_db::models::group::{CreateGroup, Group, UpdateGroup};
use callhelper_db::repositories::{GroupRepo, OrganisationRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::users::require_user;

/// Query parameters for `GET /groups`.
#[derive(Debug, Deserialize)]
pub struct GroupListParams {
    pub organisation_id: Option<DbId>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Group", id })
}

/// POST /api/v1/groups
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateGroup>,
) -> AppResult<(StatusCode, Json<Group>)> {
    input.validate()?;
    if let Some(min_active) = input.min_active {
        validate_min_active(min_active)?;
    }
    OrganisationRepo::find_by_id(&state.pool, input.organisation_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Organisation",
            id: input.organisation_id,
        }))?;
    require_user(&state.pool, input.manager_id).await?;

    let group = GroupRepo::create(&state.pool, &input).await?;
    tracing::info!(
        group_id = group.id,
        organisation_id = group.organisation_id,
        min_active = group.min_active,
        "Group created",
    );
    Ok((StatusCode::CREATED, Json(group)))
}

/// GET /api/v1/groups
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<GroupListParams>,
) -> AppResult<Json<DataResponse<Vec<Group>>>> {
    let groups = GroupRepo::list(&state.pool, params.organisation_id).await?;
    Ok(Json(DataResponse { data: groups }))
}

/// GET /api/v1/groups/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Group>> {
    let group = GroupRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(group))
}

/// PUT /api/v1/groups/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGroup>,
) -> AppResult<Json<Group>> {
    input.validate()?;
    if let Some(min_active) = input.min_active {
        validate_min_active(min_active)?;
    }
    if let Some(manager_id) = input.manager_id {
        require_user(&state.pool, manager_id).await?;
    }
    let group = GroupRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(group))
}

/// DELETE /api/v1/groups/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if GroupRepo::delete(&state.pool, id).await? {
        tracing::info!(group_id = id, "Group deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
