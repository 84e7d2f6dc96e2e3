//! Group entity model and DTOs.

use callhelper_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `groups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Group {
    pub id: DbId,
    pub organisation_id: DbId,
    pub name: String,
    pub manager_id: DbId,
    /// Minimum employees that should stay on duty during a break window.
    pub min_active: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroup {
    pub organisation_id: DbId,
    #[validate(length(min = 1, max = 250))]
    pub name: String,
    pub manager_id: DbId,
    pub min_active: Option<i32>,
}

/// DTO for updating a group. The owning organisation is immutable.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateGroup {
    #[validate(length(min = 1, max = 250))]
    pub name: Option<String>,
    pub manager_id: Option<DbId>,
    pub min_active: Option<i32>,
}
