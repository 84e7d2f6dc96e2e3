//! First-run setup performed before the server starts accepting requests.

use callhelper_core::error::CoreError;
use callhelper_core::roles::ROLE_ADMIN;
use callhelper_db::models::user::{CreateUser, User};
use callhelper_db::repositories::UserRepo;
use callhelper_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::config::AdminBootstrap;
use crate::error::{AppError, AppResult};

/// Create the configured administrator unless an active admin already exists.
///
/// Returns the created user, or `None` when nothing had to be done.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminBootstrap) -> AppResult<Option<User>> {
    if UserRepo::count_active_with_role(pool, ROLE_ADMIN).await? > 0 {
        return Ok(None);
    }

    validate_password_strength(&admin.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| CoreError::Validation(format!("ADMIN_PASSWORD: {msg}")))?;
    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await
    .map_err(|e| -> AppError {
        if callhelper_db::is_unique_violation(&e) {
            CoreError::Conflict(format!(
                "Cannot bootstrap admin '{}': username or email is taken",
                admin.username
            ))
            .into()
        } else {
            e.into()
        }
    })?;

    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
    Ok(Some(user))
}
