//! Break recording: start, end, status changes.
//!
//! Breaks are recorded against a replacement's window. Starting a break
//! locks the replacement row so concurrent starts for the same shift see a
//! consistent staffing count; ending a break locks the break row so it can
//! only be closed once.

use callhelper_core::error::CoreError;
use callhelper_core::status::StatusKind;
use callhelper_core::types::DbId;
use callhelper_db::models::break_record::{Break, EndBreak, StartBreak};
use callhelper_db::repositories::break_repo::OPEN_BREAK_CONSTRAINT;
use callhelper_db::repositories::{BreakRepo, ReplacementEmployeeRepo, ReplacementRepo};
use callhelper_db::DbPool;

use super::statuses::{following_status, resolve_status};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::ensure_self_or_admin;

fn break_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Break", id })
}

fn open_break_exists(employee_id: DbId, replacement_id: DbId) -> AppError {
    AppError::Core(CoreError::Validation(format!(
        "Employee {employee_id} already has an open break in replacement {replacement_id}"
    )))
}

/// Open a break for an assigned employee.
///
/// The start time must fall inside the replacement's break window and the
/// employee may not already have an open break in it. Falling below the
/// group's `min_active` threshold is logged, not refused. Without an explicit
/// status the break takes the active status after the initial one.
pub async fn start_break(
    pool: &DbPool,
    actor: &AuthUser,
    replacement_id: DbId,
    input: &StartBreak,
) -> AppResult<Break> {
    ensure_self_or_admin(actor, input.employee_id)?;

    let mut tx = pool.begin().await?;

    let replacement = ReplacementRepo::find_by_id_for_update(&mut *tx, replacement_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Replacement",
            id: replacement_id,
        }))?;

    ReplacementEmployeeRepo::find(&mut *tx, replacement_id, input.employee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotAssigned {
            employee_id: input.employee_id,
            replacement_id,
        }))?;

    replacement.window()?.check_start(input.break_start)?;

    if BreakRepo::find_open(&mut *tx, replacement_id, input.employee_id)
        .await?
        .is_some()
    {
        return Err(open_break_exists(input.employee_id, replacement_id));
    }

    if let Some(snapshot) = ReplacementRepo::staffing(&mut *tx, replacement_id).await? {
        let after = snapshot.after_break_start();
        if after.below_minimum() {
            tracing::warn!(
                replacement_id,
                employee_id = input.employee_id,
                on_duty = after.on_duty(),
                min_active = after.min_active,
                "Break takes replacement below minimum staffing",
            );
        }
    }

    let status = match input.status.as_deref() {
        Some(code) => resolve_status(&mut *tx, StatusKind::Break, Some(code)).await?,
        None => {
            // The first status describes a break that has not started yet.
            let initial = resolve_status(&mut *tx, StatusKind::Break, None).await?;
            following_status(&mut *tx, StatusKind::Break, &initial)
                .await?
                .unwrap_or(initial)
        }
    };
    let record = BreakRepo::create(
        &mut *tx,
        replacement_id,
        input.employee_id,
        input.break_start,
        &status,
    )
    .await
    .map_err(|e| {
        if callhelper_db::is_constraint_violation(&e, OPEN_BREAK_CONSTRAINT) {
            open_break_exists(input.employee_id, replacement_id)
        } else {
            AppError::from(e)
        }
    })?;
    tx.commit().await?;

    tracing::info!(
        break_id = record.id,
        replacement_id,
        employee_id = record.employee_id,
        break_start = %record.break_start,
        "Break started",
    );
    Ok(record)
}

/// Close an open break and record its duration.
///
/// The end must be after the start, no later than the window close, and
/// the resulting duration may not exceed the replacement's cap. Without an
/// explicit status the break advances to the next active status.
pub async fn end_break(
    pool: &DbPool,
    actor: &AuthUser,
    break_id: DbId,
    input: &EndBreak,
) -> AppResult<Break> {
    let mut tx = pool.begin().await?;

    let current = BreakRepo::find_by_id_for_update(&mut *tx, break_id)
        .await?
        .ok_or_else(|| break_not_found(break_id))?;
    ensure_self_or_admin(actor, current.employee_id)?;

    if !current.is_open() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Break {break_id} has already ended"
        ))));
    }

    let replacement = ReplacementRepo::find_by_id(&mut *tx, current.replacement_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Replacement",
            id: current.replacement_id,
        }))?;

    let duration = replacement
        .window()?
        .check_finished(current.break_start, input.break_end)?;

    let status = match input.status.as_deref() {
        Some(code) => Some(resolve_status(&mut *tx, StatusKind::Break, Some(code)).await?),
        None => following_status(&mut *tx, StatusKind::Break, &current.status).await?,
    };

    let record = BreakRepo::finish(
        &mut *tx,
        break_id,
        input.break_end,
        duration,
        status.as_deref(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(format!(
            "Break {break_id} was ended concurrently"
        )))
    })?;
    tx.commit().await?;

    tracing::info!(
        break_id,
        replacement_id = record.replacement_id,
        employee_id = record.employee_id,
        duration,
        "Break ended",
    );
    Ok(record)
}

/// Change a break's status without touching its times.
pub async fn set_break_status(
    pool: &DbPool,
    actor: &AuthUser,
    break_id: DbId,
    code: &str,
) -> AppResult<Break> {
    let mut tx = pool.begin().await?;

    let current = BreakRepo::find_by_id_for_update(&mut *tx, break_id)
        .await?
        .ok_or_else(|| break_not_found(break_id))?;
    ensure_self_or_admin(actor, current.employee_id)?;

    let status = resolve_status(&mut *tx, StatusKind::Break, Some(code)).await?;
    let record = BreakRepo::set_status(&mut *tx, break_id, &status)
        .await?
        .ok_or_else(|| break_not_found(break_id))?;
    tx.commit().await?;
    Ok(record)
}
