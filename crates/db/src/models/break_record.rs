//! Break record model and DTOs.

use callhelper_core::types::{DbId, Minutes, TimeOfDay, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `breaks` table.
///
/// `break_end` and `duration` stay `NULL` while the break is in progress.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Break {
    pub id: DbId,
    pub replacement_id: DbId,
    pub employee_id: DbId,
    pub break_start: TimeOfDay,
    pub break_end: Option<TimeOfDay>,
    /// Length in whole minutes, set when the break ends.
    pub duration: Option<Minutes>,
    /// Break status code.
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Break {
    pub fn is_open(&self) -> bool {
        self.break_end.is_none()
    }
}

/// DTO for starting a break. `status` defaults to the first active break
/// status.
#[derive(Debug, Clone, Deserialize)]
pub struct StartBreak {
    pub employee_id: DbId,
    pub break_start: TimeOfDay,
    pub status: Option<String>,
}

/// DTO for ending a break. `status`, when given, is applied with the end time.
#[derive(Debug, Clone, Deserialize)]
pub struct EndBreak {
    pub break_end: TimeOfDay,
    pub status: Option<String>,
}

/// Filters for listing breaks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BreakFilter {
    pub replacement_id: Option<DbId>,
    pub employee_id: Option<DbId>,
}
