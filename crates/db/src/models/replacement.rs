//! Replacement (scheduled shift) model and DTOs.

use callhelper_core::error::CoreError;
use callhelper_core::scheduling::BreakWindow;
use callhelper_core::types::{DbId, Minutes, TimeOfDay, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::replacement_employee::ReplacementEmployee;

/// A row from the `replacements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Replacement {
    pub id: DbId,
    pub group_id: DbId,
    pub date: NaiveDate,
    pub break_start: TimeOfDay,
    pub break_end: TimeOfDay,
    /// Longest single break allowed in this shift, in minutes.
    pub break_max_duration: Minutes,
    /// Replacement status code.
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Replacement {
    /// The break window this shift allows.
    pub fn window(&self) -> Result<BreakWindow, CoreError> {
        BreakWindow::new(self.break_start, self.break_end, self.break_max_duration)
    }
}

/// DTO for scheduling a replacement. `status` defaults to the first active
/// replacement status.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReplacement {
    pub group_id: DbId,
    pub date: NaiveDate,
    pub break_start: TimeOfDay,
    pub break_end: TimeOfDay,
    pub break_max_duration: Minutes,
    pub status: Option<String>,
}

/// DTO for rescheduling a replacement. Status changes go through the
/// dedicated transition endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReplacement {
    pub date: Option<NaiveDate>,
    pub break_start: Option<TimeOfDay>,
    pub break_end: Option<TimeOfDay>,
    pub break_max_duration: Option<Minutes>,
}

impl UpdateReplacement {
    /// Merge the patch over `current` and return the resulting window.
    pub fn merged_window(&self, current: &Replacement) -> Result<BreakWindow, CoreError> {
        BreakWindow::new(
            self.break_start.unwrap_or(current.break_start),
            self.break_end.unwrap_or(current.break_end),
            self.break_max_duration.unwrap_or(current.break_max_duration),
        )
    }
}

/// A replacement with its assigned employees inline.
#[derive(Debug, Clone, Serialize)]
pub struct ReplacementWithEmployees {
    #[serde(flatten)]
    pub replacement: Replacement,
    pub employees: Vec<ReplacementEmployee>,
}

/// Filters for listing replacements.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplacementFilter {
    pub group_id: Option<DbId>,
    pub date: Option<NaiveDate>,
    pub status: Option<String>,
}
