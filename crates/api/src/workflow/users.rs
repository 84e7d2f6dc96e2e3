//! Lookups for users referenced from other resources.

use callhelper_core::error::CoreError;
use callhelper_core::types::DbId;
use callhelper_db::models::user::User;
use callhelper_db::repositories::UserRepo;
use callhelper_db::DbPool;

use crate::error::{AppError, AppResult};

/// Load a user named in a request body, or fail with 404 `NOT_FOUND`.
///
/// Directors, managers and assigned employees are checked this way before
/// the referencing row is written.
pub async fn require_user(pool: &DbPool, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}
