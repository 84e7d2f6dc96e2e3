//! Status dictionary rows (`replacement_statuses`, `break_statuses`).
//!
//! Both dictionaries share one row shape; [`StatusKind`] selects the table.
//!
//! [`StatusKind`]: callhelper_core::status::StatusKind

use callhelper_core::status::StatusEntry;
use callhelper_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from either status dictionary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusDefinition {
    pub code: String,
    pub name: String,
    pub sort: i32,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StatusEntry for StatusDefinition {
    fn code(&self) -> &str {
        &self.code
    }

    fn sort(&self) -> i32 {
        self.sort
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// DTO for creating a status.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStatus {
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub sort: Option<i32>,
    pub active: Option<bool>,
}

/// DTO for updating a status. The code is immutable.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStatus {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub sort: Option<i32>,
    pub active: Option<bool>,
}
