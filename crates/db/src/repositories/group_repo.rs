//! Repository for the `groups` table.
//!
//! Delete semantics: CASCADE to replacements, assignments and breaks.

use callhelper_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::group::{CreateGroup, Group, UpdateGroup};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, organisation_id, name, manager_id, min_active, created_at, updated_at";

/// Provides CRUD operations for groups.
pub struct GroupRepo;

impl GroupRepo {
    /// Insert a new group, returning the created row.
    ///
    /// `min_active` defaults to 0.
    pub async fn create(pool: &PgPool, input: &CreateGroup) -> Result<Group, sqlx::Error> {
        let query = format!(
            "INSERT INTO groups (organisation_id, name, manager_id, min_active)
             VALUES ($1, $2, $3, COALESCE($4, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(input.organisation_id)
            .bind(&input.name)
            .bind(input.manager_id)
            .bind(input.min_active)
            .fetch_one(pool)
            .await
    }

    /// Find a group by its internal ID.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Group>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM groups WHERE id = $1");
        sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List groups, optionally restricted to one organisation.
    ///
    /// Ordered by organisation, then name.
    pub async fn list(
        pool: &PgPool,
        organisation_id: Option<DbId>,
    ) -> Result<Vec<Group>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM groups
             WHERE ($1::BIGINT IS NULL OR organisation_id = $1)
             ORDER BY organisation_id, name, id"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(organisation_id)
            .fetch_all(pool)
            .await
    }

    /// Update a group. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGroup,
    ) -> Result<Option<Group>, sqlx::Error> {
        let query = format!(
            "UPDATE groups SET
                name = COALESCE($2, name),
                manager_id = COALESCE($3, manager_id),
                min_active = COALESCE($4, min_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.manager_id)
            .bind(input.min_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a group and everything it owns. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
