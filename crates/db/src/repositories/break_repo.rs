//! Repository for the `breaks` table.
//!
//! At most one open break (`break_end IS NULL`) may exist per employee and
//! replacement (`uq_breaks_open_per_employee`).

use callhelper_core::types::{DbId, Minutes, TimeOfDay};
use sqlx::{PgExecutor, PgPool};

use crate::models::break_record::{Break, BreakFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, replacement_id, employee_id, break_start, break_end, duration, \
                       status, created_at, updated_at";

/// [`COLUMNS`] qualified with the `b` alias for joined queries.
const COLUMNS_B: &str = "b.id, b.replacement_id, b.employee_id, b.break_start, b.break_end, \
                         b.duration, b.status, b.created_at, b.updated_at";

/// Name of the partial unique index allowing one open break per employee.
pub const OPEN_BREAK_CONSTRAINT: &str = "uq_breaks_open_per_employee";

/// Provides CRUD operations for break records.
pub struct BreakRepo;

impl BreakRepo {
    /// Record the start of a break with an already-resolved status code.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        replacement_id: DbId,
        employee_id: DbId,
        break_start: TimeOfDay,
        status: &str,
    ) -> Result<Break, sqlx::Error> {
        let query = format!(
            "INSERT INTO breaks (replacement_id, employee_id, break_start, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Break>(&query)
            .bind(replacement_id)
            .bind(employee_id)
            .bind(break_start)
            .bind(status)
            .fetch_one(executor)
            .await
    }

    /// Find a break by its internal ID.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Break>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM breaks WHERE id = $1");
        sqlx::query_as::<_, Break>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a break and lock its row until the surrounding transaction ends.
    pub async fn find_by_id_for_update(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Break>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM breaks WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Break>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find the employee's open break in a replacement, if any.
    pub async fn find_open(
        executor: impl PgExecutor<'_>,
        replacement_id: DbId,
        employee_id: DbId,
    ) -> Result<Option<Break>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM breaks
             WHERE replacement_id = $1 AND employee_id = $2 AND break_end IS NULL"
        );
        sqlx::query_as::<_, Break>(&query)
            .bind(replacement_id)
            .bind(employee_id)
            .fetch_optional(executor)
            .await
    }

    /// All breaks recorded in a replacement, ordered by start.
    pub async fn list_for_replacement(
        executor: impl PgExecutor<'_>,
        replacement_id: DbId,
    ) -> Result<Vec<Break>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM breaks
             WHERE replacement_id = $1
             ORDER BY break_start, id"
        );
        sqlx::query_as::<_, Break>(&query)
            .bind(replacement_id)
            .fetch_all(executor)
            .await
    }

    /// Close an open break with its computed duration. `status`, when given,
    /// replaces the current status.
    ///
    /// Returns `None` if the break does not exist or has already ended.
    pub async fn finish(
        executor: impl PgExecutor<'_>,
        id: DbId,
        break_end: TimeOfDay,
        duration: Minutes,
        status: Option<&str>,
    ) -> Result<Option<Break>, sqlx::Error> {
        let query = format!(
            "UPDATE breaks SET
                break_end = $2,
                duration = $3,
                status = COALESCE($4, status)
             WHERE id = $1 AND break_end IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Break>(&query)
            .bind(id)
            .bind(break_end)
            .bind(duration)
            .bind(status)
            .fetch_optional(executor)
            .await
    }

    /// Move a break to another status code.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_status(
        executor: impl PgExecutor<'_>,
        id: DbId,
        status: &str,
    ) -> Result<Option<Break>, sqlx::Error> {
        let query = format!("UPDATE breaks SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Break>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(executor)
            .await
    }

    /// List breaks matching `filter`.
    ///
    /// Ordered by replacement date (newest first), then break start.
    pub async fn list(
        pool: &PgPool,
        filter: &BreakFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Break>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS_B} FROM breaks b
             JOIN replacements r ON r.id = b.replacement_id
             WHERE ($1::BIGINT IS NULL OR b.replacement_id = $1)
               AND ($2::BIGINT IS NULL OR b.employee_id = $2)
             ORDER BY r.date DESC, b.break_start ASC, b.id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Break>(&query)
            .bind(filter.replacement_id)
            .bind(filter.employee_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count the breaks an employee has recorded in one replacement.
    pub async fn count_for_employee(
        executor: impl PgExecutor<'_>,
        replacement_id: DbId,
        employee_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM breaks WHERE replacement_id = $1 AND employee_id = $2",
        )
        .bind(replacement_id)
        .bind(employee_id)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    /// Delete a break record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM breaks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
