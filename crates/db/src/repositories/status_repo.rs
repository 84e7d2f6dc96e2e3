//! Repository for the `replacement_statuses` and `break_statuses` tables.
//!
//! Both dictionaries share a row shape, so every method takes the
//! [`StatusKind`] that selects the table. Table names come from
//! [`StatusKind::table`] and are never caller-supplied strings.
//!
//! Delete semantics: RESTRICT. Rows referenced from scheduling tables cannot
//! be deleted; callers should check [`StatusRepo::count_references`] first
//! and the foreign keys reject anything that slips through.

use callhelper_core::status::StatusKind;
use sqlx::{PgExecutor, PgPool};

use crate::models::status::{CreateStatus, StatusDefinition, UpdateStatus};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "code, name, sort, active, created_at, updated_at";

/// Provides CRUD operations for both status dictionaries.
pub struct StatusRepo;

impl StatusRepo {
    /// Insert a new status, returning the created row.
    pub async fn create(
        pool: &PgPool,
        kind: StatusKind,
        input: &CreateStatus,
    ) -> Result<StatusDefinition, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (code, name, sort, active) \
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, true)) \
             RETURNING {COLUMNS}",
            kind.table()
        );
        sqlx::query_as::<_, StatusDefinition>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.sort)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    /// Find a status by code.
    pub async fn find(
        executor: impl PgExecutor<'_>,
        kind: StatusKind,
        code: &str,
    ) -> Result<Option<StatusDefinition>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE code = $1", kind.table());
        sqlx::query_as::<_, StatusDefinition>(&query)
            .bind(code)
            .fetch_optional(executor)
            .await
    }

    /// List statuses, optionally including inactive ones.
    ///
    /// Ordered by sort, then code.
    pub async fn list(
        executor: impl PgExecutor<'_>,
        kind: StatusKind,
        include_inactive: bool,
    ) -> Result<Vec<StatusDefinition>, sqlx::Error> {
        let filter = if include_inactive {
            ""
        } else {
            "WHERE active = true "
        };
        let query = format!(
            "SELECT {COLUMNS} FROM {} {filter}ORDER BY sort, code",
            kind.table()
        );
        sqlx::query_as::<_, StatusDefinition>(&query)
            .fetch_all(executor)
            .await
    }

    /// Update a status. Only non-`None` fields are applied. Code is immutable.
    ///
    /// Returns `None` if no row with the given code exists.
    pub async fn update(
        pool: &PgPool,
        kind: StatusKind,
        code: &str,
        input: &UpdateStatus,
    ) -> Result<Option<StatusDefinition>, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET \
                name = COALESCE($2, name), \
                sort = COALESCE($3, sort), \
                active = COALESCE($4, active) \
             WHERE code = $1 \
             RETURNING {COLUMNS}",
            kind.table()
        );
        sqlx::query_as::<_, StatusDefinition>(&query)
            .bind(code)
            .bind(&input.name)
            .bind(input.sort)
            .bind(input.active)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a status (set active = false).
    pub async fn deactivate(
        pool: &PgPool,
        kind: StatusKind,
        code: &str,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET active = false WHERE code = $1 AND active = true",
            kind.table()
        );
        let result = sqlx::query(&query).bind(code).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count scheduling rows that still reference `code`.
    pub async fn count_references(
        executor: impl PgExecutor<'_>,
        kind: StatusKind,
        code: &str,
    ) -> Result<i64, sqlx::Error> {
        let sum = kind
            .referencing_tables()
            .iter()
            .map(|table| format!("(SELECT COUNT(*) FROM {table} WHERE status = $1)"))
            .collect::<Vec<_>>()
            .join(" + ");
        let query = format!("SELECT ({sum})::BIGINT");
        let (count,): (i64,) = sqlx::query_as(&query)
            .bind(code)
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    /// Hard-delete a status. Returns `true` if a row was removed.
    pub async fn delete(
        executor: impl PgExecutor<'_>,
        kind: StatusKind,
        code: &str,
    ) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE code = $1", kind.table());
        let result = sqlx::query(&query).bind(code).execute(executor).await?;
        Ok(result.rows_affected() > 0)
    }
}
