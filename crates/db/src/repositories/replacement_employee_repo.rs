//! Repository for the `replacement_employees` table.
//!
//! The `(employee_id, replacement_id)` pair is unique
//! (`uq_replacement_employees_employee_replacement`).

use callhelper_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::replacement_employee::ReplacementEmployee;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, replacement_id, employee_id, status, created_at, updated_at";

/// Name of the unique constraint guarding duplicate assignments.
pub const UNIQUE_ASSIGNMENT_CONSTRAINT: &str = "uq_replacement_employees_employee_replacement";

/// Provides CRUD operations for replacement assignments.
pub struct ReplacementEmployeeRepo;

impl ReplacementEmployeeRepo {
    /// Assign an employee with an already-resolved status code.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        replacement_id: DbId,
        employee_id: DbId,
        status: &str,
    ) -> Result<ReplacementEmployee, sqlx::Error> {
        let query = format!(
            "INSERT INTO replacement_employees (replacement_id, employee_id, status)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReplacementEmployee>(&query)
            .bind(replacement_id)
            .bind(employee_id)
            .bind(status)
            .fetch_one(executor)
            .await
    }

    /// Find the assignment of `employee_id` to `replacement_id`.
    pub async fn find(
        executor: impl PgExecutor<'_>,
        replacement_id: DbId,
        employee_id: DbId,
    ) -> Result<Option<ReplacementEmployee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM replacement_employees
             WHERE replacement_id = $1 AND employee_id = $2"
        );
        sqlx::query_as::<_, ReplacementEmployee>(&query)
            .bind(replacement_id)
            .bind(employee_id)
            .fetch_optional(executor)
            .await
    }

    /// List the employees assigned to a replacement, in assignment order.
    pub async fn list_for_replacement(
        executor: impl PgExecutor<'_>,
        replacement_id: DbId,
    ) -> Result<Vec<ReplacementEmployee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM replacement_employees
             WHERE replacement_id = $1
             ORDER BY id"
        );
        sqlx::query_as::<_, ReplacementEmployee>(&query)
            .bind(replacement_id)
            .fetch_all(executor)
            .await
    }

    /// Update the per-employee status. Returns `None` if the assignment does
    /// not exist.
    pub async fn set_status(
        executor: impl PgExecutor<'_>,
        replacement_id: DbId,
        employee_id: DbId,
        status: &str,
    ) -> Result<Option<ReplacementEmployee>, sqlx::Error> {
        let query = format!(
            "UPDATE replacement_employees SET status = $3
             WHERE replacement_id = $1 AND employee_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReplacementEmployee>(&query)
            .bind(replacement_id)
            .bind(employee_id)
            .bind(status)
            .fetch_optional(executor)
            .await
    }

    /// Remove an assignment. Returns `true` if a row was removed.
    pub async fn delete(
        executor: impl PgExecutor<'_>,
        replacement_id: DbId,
        employee_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM replacement_employees WHERE replacement_id = $1 AND employee_id = $2",
        )
        .bind(replacement_id)
        .bind(employee_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
