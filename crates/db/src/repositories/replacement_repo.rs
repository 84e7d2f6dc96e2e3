//! Repository for the `replacements` table.
//!
//! Delete semantics: CASCADE to `replacement_employees` and `breaks`.

use callhelper_core::staffing::StaffingSnapshot;
use callhelper_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::replacement::{
    CreateReplacement, Replacement, ReplacementFilter, ReplacementWithEmployees, UpdateReplacement,
};
use crate::repositories::ReplacementEmployeeRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, group_id, date, break_start, break_end, break_max_duration, \
                       status, created_at, updated_at";

/// Provides CRUD operations for replacements.
pub struct ReplacementRepo;

impl ReplacementRepo {
    /// Insert a new replacement with an already-resolved status code.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateReplacement,
        status: &str,
    ) -> Result<Replacement, sqlx::Error> {
        let query = format!(
            "INSERT INTO replacements \
                (group_id, date, break_start, break_end, break_max_duration, status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Replacement>(&query)
            .bind(input.group_id)
            .bind(input.date)
            .bind(input.break_start)
            .bind(input.break_end)
            .bind(input.break_max_duration)
            .bind(status)
            .fetch_one(executor)
            .await
    }

    /// Find a replacement by its internal ID.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Replacement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM replacements WHERE id = $1");
        sqlx::query_as::<_, Replacement>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a replacement and lock its row until the surrounding transaction
    /// ends. Serializes break starts within one shift.
    pub async fn find_by_id_for_update(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Replacement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM replacements WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Replacement>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a replacement with its assigned employees inline.
    pub async fn find_with_employees(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ReplacementWithEmployees>, sqlx::Error> {
        let Some(replacement) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let employees = ReplacementEmployeeRepo::list_for_replacement(pool, id).await?;
        Ok(Some(ReplacementWithEmployees {
            replacement,
            employees,
        }))
    }

    /// List replacements matching `filter`, newest date first.
    pub async fn list(
        pool: &PgPool,
        filter: &ReplacementFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Replacement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM replacements
             WHERE ($1::BIGINT IS NULL OR group_id = $1)
               AND ($2::DATE IS NULL OR date = $2)
               AND ($3::VARCHAR IS NULL OR status = $3)
             ORDER BY date DESC, group_id, id
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Replacement>(&query)
            .bind(filter.group_id)
            .bind(filter.date)
            .bind(&filter.status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update the schedule of a replacement. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        executor: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateReplacement,
    ) -> Result<Option<Replacement>, sqlx::Error> {
        let query = format!(
            "UPDATE replacements SET
                date = COALESCE($2, date),
                break_start = COALESCE($3, break_start),
                break_end = COALESCE($4, break_end),
                break_max_duration = COALESCE($5, break_max_duration)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Replacement>(&query)
            .bind(id)
            .bind(input.date)
            .bind(input.break_start)
            .bind(input.break_end)
            .bind(input.break_max_duration)
            .fetch_optional(executor)
            .await
    }

    /// Move a replacement to another status code.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_status(
        executor: impl PgExecutor<'_>,
        id: DbId,
        status: &str,
    ) -> Result<Option<Replacement>, sqlx::Error> {
        let query = format!(
            "UPDATE replacements SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Replacement>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(executor)
            .await
    }

    /// Delete a replacement together with its assignments and breaks.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM replacements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Current staffing of a replacement against its group's `min_active`.
    ///
    /// An employee is on break while they have a break with no end time.
    pub async fn staffing(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<StaffingSnapshot>, sqlx::Error> {
        let row: Option<(i64, i64, i32)> = sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM replacement_employees re
                  WHERE re.replacement_id = r.id),
                (SELECT COUNT(DISTINCT b.employee_id) FROM breaks b
                  JOIN replacement_employees re
                    ON re.replacement_id = b.replacement_id AND re.employee_id = b.employee_id
                  WHERE b.replacement_id = r.id AND b.break_end IS NULL),
                g.min_active
             FROM replacements r
             JOIN groups g ON g.id = r.group_id
             WHERE r.id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(row.map(|(assigned, on_break, min_active)| StaffingSnapshot {
            assigned,
            on_break,
            min_active,
        }))
    }
}
