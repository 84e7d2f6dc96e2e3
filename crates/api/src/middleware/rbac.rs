//! Role-based access control extractors and ownership checks.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use callhelper_core::error::CoreError;
use callhelper_core::roles::ROLE_ADMIN;
use callhelper_core::types::DbId;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires any authenticated user.
///
/// Equivalent to [`AuthUser`], named for routes where "requires
/// authentication" should read explicitly.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}

/// Employees may only act on their own breaks; admins may act on anyone's.
pub fn ensure_self_or_admin(user: &AuthUser, employee_id: DbId) -> Result<(), AppError> {
    if user.is_admin() || user.user_id == employee_id {
        return Ok(());
    }
    Err(AppError::Core(CoreError::Forbidden(
        "Employees may only manage their own breaks".into(),
    )))
}
