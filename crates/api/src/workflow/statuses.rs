//! Status dictionary management and status resolution for new records.

use callhelper_core::error::CoreError;
use callhelper_core::status::{
    ensure_assignable, initial_status, next_status, validate_status_code, StatusKind,
};
use callhelper_db::models::status::{CreateStatus, StatusDefinition};
use callhelper_db::repositories::StatusRepo;
use callhelper_db::DbPool;
use sqlx::PgConnection;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Resolve the status code to store on a record.
///
/// An explicit code must exist and be active. Without one, the first active
/// status by sort order is used.
pub async fn resolve_status(
    conn: &mut PgConnection,
    kind: StatusKind,
    requested: Option<&str>,
) -> AppResult<String> {
    match requested {
        Some(code) => {
            let entry = StatusRepo::find(&mut *conn, kind, code).await?;
            ensure_assignable(kind, code, entry.as_ref())?;
            Ok(code.to_string())
        }
        None => {
            let entries = StatusRepo::list(&mut *conn, kind, false).await?;
            let initial = initial_status(&entries).ok_or_else(|| {
                CoreError::Conflict(format!("No active {kind} status is configured"))
            })?;
            Ok(initial.code.clone())
        }
    }
}

/// The active status that follows `current` in the dictionary's sort order,
/// or `None` when `current` is already the last one.
pub async fn following_status(
    conn: &mut PgConnection,
    kind: StatusKind,
    current: &str,
) -> AppResult<Option<String>> {
    let entries = StatusRepo::list(&mut *conn, kind, true).await?;
    Ok(next_status(&entries, current).map(|e| e.code.clone()))
}

/// Add a status to a dictionary.
pub async fn create_status(
    pool: &DbPool,
    kind: StatusKind,
    input: &CreateStatus,
) -> AppResult<StatusDefinition> {
    input.validate()?;
    validate_status_code(&input.code)?;

    if StatusRepo::find(pool, kind, &input.code).await?.is_some() {
        return Err(CoreError::Conflict(format!(
            "{kind} status '{}' already exists",
            input.code
        ))
        .into());
    }

    let status = StatusRepo::create(pool, kind, input)
        .await
        .map_err(|e| -> AppError {
            if callhelper_db::is_unique_violation(&e) {
                CoreError::Conflict(format!("{kind} status '{}' already exists", input.code))
                    .into()
            } else {
                e.into()
            }
        })?;

    tracing::info!(kind = %kind, code = %status.code, "Status created");
    Ok(status)
}

/// Delete a status that no record references.
///
/// Referenced statuses must be deactivated instead.
pub async fn delete_status(pool: &DbPool, kind: StatusKind, code: &str) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    if StatusRepo::find(&mut *tx, kind, code).await?.is_none() {
        return Err(CoreError::CodeNotFound {
            entity: status_entity(kind),
            code: code.to_string(),
        }
        .into());
    }

    let references = StatusRepo::count_references(&mut *tx, kind, code).await?;
    if references > 0 {
        return Err(CoreError::ReferentialIntegrity(format!(
            "{kind} status '{code}' is used by {references} record(s); deactivate it instead"
        ))
        .into());
    }

    StatusRepo::delete(&mut *tx, kind, code).await?;
    tx.commit().await?;

    tracing::info!(kind = %kind, code, "Status deleted");
    Ok(())
}

/// Entity name used in not-found errors.
pub fn status_entity(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::Replacement => "ReplacementStatus",
        StatusKind::Break => "BreakStatus",
    }
}
