//! Replacement scheduling, status transitions and employee assignments.

use callhelper_core::error::CoreError;
use callhelper_core::scheduling::BreakWindow;
use callhelper_core::staffing::StaffingSummary;
use callhelper_core::status::StatusKind;
use callhelper_core::types::DbId;
use callhelper_db::models::replacement::{CreateReplacement, Replacement, UpdateReplacement};
use callhelper_db::models::replacement_employee::{AssignEmployee, ReplacementEmployee};
use callhelper_db::repositories::replacement_employee_repo::UNIQUE_ASSIGNMENT_CONSTRAINT;
use callhelper_db::repositories::{BreakRepo, GroupRepo, ReplacementEmployeeRepo, ReplacementRepo};
use callhelper_db::DbPool;

use super::statuses::resolve_status;
use super::users::require_user;
use crate::error::{AppError, AppResult};

fn replacement_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Replacement",
        id,
    })
}

/// Schedule a replacement for a group.
///
/// The break window must be well-formed; the status defaults to the first
/// active replacement status.
pub async fn create_replacement(
    pool: &DbPool,
    input: &CreateReplacement,
) -> AppResult<Replacement> {
    BreakWindow::new(input.break_start, input.break_end, input.break_max_duration)?;

    let mut tx = pool.begin().await?;

    GroupRepo::find_by_id(&mut *tx, input.group_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Group",
            id: input.group_id,
        }))?;

    let status =
        resolve_status(&mut *tx, StatusKind::Replacement, input.status.as_deref()).await?;
    let replacement = ReplacementRepo::create(&mut *tx, input, &status).await?;
    tx.commit().await?;

    tracing::info!(
        replacement_id = replacement.id,
        group_id = replacement.group_id,
        date = %replacement.date,
        status = %replacement.status,
        "Replacement scheduled",
    );
    Ok(replacement)
}

/// Reschedule a replacement. Omitted fields keep their current values.
///
/// The merged window must be well-formed and every break already recorded
/// in the replacement must still fit inside it.
pub async fn update_replacement(
    pool: &DbPool,
    id: DbId,
    input: &UpdateReplacement,
) -> AppResult<Replacement> {
    let mut tx = pool.begin().await?;

    let current = ReplacementRepo::find_by_id_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| replacement_not_found(id))?;
    let window = input.merged_window(&current)?;

    for record in BreakRepo::list_for_replacement(&mut *tx, id).await? {
        window
            .check_recorded(record.break_start, record.break_end)
            .map_err(|e| {
                CoreError::Validation(format!(
                    "Break {} no longer fits the new schedule: {e}",
                    record.id
                ))
            })?;
    }

    let replacement = ReplacementRepo::update(&mut *tx, id, input)
        .await?
        .ok_or_else(|| replacement_not_found(id))?;
    tx.commit().await?;

    tracing::info!(
        replacement_id = id,
        break_start = %replacement.break_start,
        break_end = %replacement.break_end,
        break_max_duration = replacement.break_max_duration,
        "Replacement rescheduled",
    );
    Ok(replacement)
}

/// Move a replacement to another status from the dictionary.
pub async fn transition_status(pool: &DbPool, id: DbId, code: &str) -> AppResult<Replacement> {
    let mut tx = pool.begin().await?;

    let current = ReplacementRepo::find_by_id_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| replacement_not_found(id))?;
    let status = resolve_status(&mut *tx, StatusKind::Replacement, Some(code)).await?;
    let replacement = ReplacementRepo::set_status(&mut *tx, id, &status)
        .await?
        .ok_or_else(|| replacement_not_found(id))?;
    tx.commit().await?;

    tracing::info!(
        replacement_id = id,
        from = %current.status,
        to = %replacement.status,
        "Replacement status changed",
    );
    Ok(replacement)
}

/// Assign an employee to a replacement.
///
/// Each employee appears at most once per replacement.
pub async fn assign_employee(
    pool: &DbPool,
    replacement_id: DbId,
    input: &AssignEmployee,
) -> AppResult<ReplacementEmployee> {
    require_user(pool, input.employee_id).await?;

    let duplicate = || {
        AppError::Core(CoreError::DuplicateAssignment {
            employee_id: input.employee_id,
            replacement_id,
        })
    };

    let mut tx = pool.begin().await?;

    ReplacementRepo::find_by_id_for_update(&mut *tx, replacement_id)
        .await?
        .ok_or_else(|| replacement_not_found(replacement_id))?;

    if ReplacementEmployeeRepo::find(&mut *tx, replacement_id, input.employee_id)
        .await?
        .is_some()
    {
        return Err(duplicate());
    }

    let status =
        resolve_status(&mut *tx, StatusKind::Replacement, input.status.as_deref()).await?;
    let assignment =
        ReplacementEmployeeRepo::create(&mut *tx, replacement_id, input.employee_id, &status)
            .await
            .map_err(|e| {
                if callhelper_db::is_constraint_violation(&e, UNIQUE_ASSIGNMENT_CONSTRAINT) {
                    duplicate()
                } else {
                    AppError::from(e)
                }
            })?;
    tx.commit().await?;

    tracing::info!(
        replacement_id,
        employee_id = input.employee_id,
        status = %assignment.status,
        "Employee assigned",
    );
    Ok(assignment)
}

/// Change an assigned employee's status within a replacement.
pub async fn set_employee_status(
    pool: &DbPool,
    replacement_id: DbId,
    employee_id: DbId,
    code: &str,
) -> AppResult<ReplacementEmployee> {
    let mut tx = pool.begin().await?;
    let status = resolve_status(&mut *tx, StatusKind::Replacement, Some(code)).await?;
    let assignment =
        ReplacementEmployeeRepo::set_status(&mut *tx, replacement_id, employee_id, &status)
            .await?
            .ok_or(AppError::Core(CoreError::NotAssigned {
                employee_id,
                replacement_id,
            }))?;
    tx.commit().await?;
    Ok(assignment)
}

/// Remove an employee from a replacement.
///
/// Refused while the employee still has break records in the replacement.
pub async fn unassign_employee(
    pool: &DbPool,
    replacement_id: DbId,
    employee_id: DbId,
) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    let breaks = BreakRepo::count_for_employee(&mut *tx, replacement_id, employee_id).await?;
    if breaks > 0 {
        return Err(AppError::Core(CoreError::ReferentialIntegrity(format!(
            "Employee {employee_id} has {breaks} break(s) in replacement {replacement_id}"
        ))));
    }

    let removed = ReplacementEmployeeRepo::delete(&mut *tx, replacement_id, employee_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotAssigned {
            employee_id,
            replacement_id,
        }));
    }
    tx.commit().await?;

    tracing::info!(replacement_id, employee_id, "Employee unassigned");
    Ok(())
}

/// Current staffing of a replacement against its group's threshold.
pub async fn staffing(pool: &DbPool, replacement_id: DbId) -> AppResult<StaffingSummary> {
    let snapshot = ReplacementRepo::staffing(pool, replacement_id)
        .await?
        .ok_or_else(|| replacement_not_found(replacement_id))?;
    Ok(snapshot.into())
}
