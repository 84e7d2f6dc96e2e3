//! Organisation entity model and DTOs.

use callhelper_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `organisations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Organisation {
    pub id: DbId,
    pub name: String,
    pub director_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrganisation {
    #[validate(length(min = 1, max = 250))]
    pub name: String,
    pub director_id: DbId,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateOrganisation {
    #[validate(length(min = 1, max = 250))]
    pub name: Option<String>,
    pub director_id: Option<DbId>,
}
