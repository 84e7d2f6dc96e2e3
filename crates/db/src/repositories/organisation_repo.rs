//! Repository for the `organisations` table.
//!
//! Delete semantics: CASCADE to groups, and through them to replacements,
//! assignments and breaks.

use callhelper_core::types::DbId;
use sqlx::PgPool;

use crate::models::organisation::{CreateOrganisation, Organisation, UpdateOrganisation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, director_id, created_at, updated_at";

/// Provides CRUD operations for organisations.
pub struct OrganisationRepo;

impl OrganisationRepo {
    /// Insert a new organisation, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOrganisation,
    ) -> Result<Organisation, sqlx::Error> {
        let query = format!(
            "INSERT INTO organisations (name, director_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organisation>(&query)
            .bind(&input.name)
            .bind(input.director_id)
            .fetch_one(pool)
            .await
    }

    /// Find an organisation by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Organisation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organisations WHERE id = $1");
        sqlx::query_as::<_, Organisation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all organisations ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Organisation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organisations ORDER BY name, id");
        sqlx::query_as::<_, Organisation>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update an organisation. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrganisation,
    ) -> Result<Option<Organisation>, sqlx::Error> {
        let query = format!(
            "UPDATE organisations SET
                name = COALESCE($2, name),
                director_id = COALESCE($3, director_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organisation>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.director_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an organisation and everything it owns. Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM organisations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
