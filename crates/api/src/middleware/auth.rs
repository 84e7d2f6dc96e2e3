//! Authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use callhelper_core::error::CoreError;
use callhelper_core::roles::ROLE_ADMIN;
use callhelper_core::types::DbId;
use callhelper_db::repositories::UserRepo;

use crate::auth::basic::{parse_basic_header, BasicCredentials};
use crate::auth::jwt::validate_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticated user extracted from the `Authorization` header.
///
/// Accepts `Bearer <jwt>` (validated against the signing secret) or
/// `Basic <base64(username:password)>` (checked against the stored hash of
/// an active user).
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// The user's role name (`"admin"` or `"employee"`).
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let claims = validate_token(token, &state.config.jwt)
                .map_err(|_| unauthorized("Invalid or expired token"))?;
            return Ok(AuthUser {
                user_id: claims.sub,
                role: claims.role,
            });
        }

        if let Some(creds) = parse_basic_header(auth_header) {
            return authenticate_basic(state, creds).await;
        }

        Err(unauthorized(
            "Invalid Authorization format. Expected: Bearer <token> or Basic <credentials>",
        ))
    }
}

async fn authenticate_basic(state: &AppState, creds: BasicCredentials) -> AppResult<AuthUser> {
    let user = UserRepo::find_by_username(&state.pool, &creds.username)
        .await?
        .ok_or_else(|| unauthorized("Invalid username or password"))?;

    let valid = verify_password(&creds.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        return Err(unauthorized("Invalid username or password"));
    }
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    Ok(AuthUser {
        user_id: user.id,
        role: user.role,
    })
}
