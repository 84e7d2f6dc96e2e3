//! Employee assignment to a replacement (join row with workflow state).

use callhelper_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `replacement_employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReplacementEmployee {
    pub id: DbId,
    pub replacement_id: DbId,
    pub employee_id: DbId,
    /// Replacement status code for this employee's participation.
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for assigning an employee. `status` defaults to the first active
/// replacement status.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignEmployee {
    pub employee_id: DbId,
    pub status: Option<String>,
}
