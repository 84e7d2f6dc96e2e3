//! Handlers for the `/organisations` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use callhelper_core::error::CoreError;
use callhelper_core::types::DbId;
use callhelper_db::models::group::Group;
use callhelper_db::models::organisation::{CreateOrganisation, Organisation, UpdateOrganisation};
use callhelper_db::repositories::{GroupRepo, OrganisationRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::users::require_user;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Organisation",
        id,
    })
}

/// POST /api/v1/organisations
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateOrganisation>,
) -> AppResult<(StatusCode, Json<Organisation>)> {
    input.validate()?;
    require_user(&state.pool, input.director_id).await?;
    let organisation = OrganisationRepo::create(&state.pool, &input).await?;
    tracing::info!(
        organisation_id = organisation.id,
        name = %organisation.name,
        "Organisation created",
    );
    Ok((StatusCode::CREATED, Json(organisation)))
}

/// GET /api/v1/organisations
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Organisation>>>> {
    let organisations = OrganisationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: organisations,
    }))
}

/// GET /api/v1/organisations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Organisation>> {
    let organisation = OrganisationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(organisation))
}

/// PUT /api/v1/organisations/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrganisation>,
) -> AppResult<Json<Organisation>> {
    input.validate()?;
    if let Some(director_id) = input.director_id {
        require_user(&state.pool, director_id).await?;
    }
    let organisation = OrganisationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(organisation))
}

/// DELETE /api/v1/organisations/{id}
///
/// Cascades to the organisation's groups and their replacements.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if OrganisationRepo::delete(&state.pool, id).await? {
        tracing::info!(organisation_id = id, "Organisation deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/v1/organisations/{id}/groups
pub async fn list_groups(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Group>>>> {
    OrganisationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let groups = GroupRepo::list(&state.pool, Some(id)).await?;
    Ok(Json(DataResponse { data: groups }))
}
