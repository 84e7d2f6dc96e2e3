//! Group staffing threshold (`min_active`).
//!
//! The threshold is informational: breaks that take a replacement below it
//! are still recorded, but callers can report and log the shortfall.

use serde::Serialize;

use crate::error::CoreError;

/// Validate a group's `min_active` threshold.
pub fn validate_min_active(min_active: i32) -> Result<(), CoreError> {
    if min_active < 0 {
        return Err(CoreError::Validation(format!(
            "min_active must be 0 or greater, got {min_active}"
        )));
    }
    Ok(())
}

/// Point-in-time staffing of a replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StaffingSnapshot {
    /// Employees assigned to the replacement.
    pub assigned: i64,
    /// Assigned employees with an open (not yet ended) break.
    pub on_break: i64,
    /// The owning group's threshold.
    pub min_active: i32,
}

impl StaffingSnapshot {
    pub fn on_duty(&self) -> i64 {
        (self.assigned - self.on_break).max(0)
    }

    pub fn below_minimum(&self) -> bool {
        self.on_duty() < i64::from(self.min_active)
    }

    /// Staffing after one more on-duty employee leaves for a break.
    pub fn after_break_start(&self) -> Self {
        Self {
            on_break: (self.on_break + 1).min(self.assigned),
            ..*self
        }
    }
}

/// Serializable staffing summary returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct StaffingSummary {
    pub assigned: i64,
    pub on_break: i64,
    pub on_duty: i64,
    pub min_active: i32,
    pub below_minimum: bool,
}

impl From<StaffingSnapshot> for StaffingSummary {
    fn from(s: StaffingSnapshot) -> Self {
        Self {
            assigned: s.assigned,
            on_break: s.on_break,
            on_duty: s.on_duty(),
            min_active: s.min_active,
            below_minimum: s.below_minimum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(assigned: i64, on_break: i64, min_active: i32) -> StaffingSnapshot {
        StaffingSnapshot {
            assigned,
            on_break,
            min_active,
        }
    }

    #[test]
    fn min_active_must_not_be_negative() {
        assert!(validate_min_active(0).is_ok());
        assert!(validate_min_active(2).is_ok());
        assert!(validate_min_active(-1).is_err());
    }

    #[test]
    fn on_duty_is_assigned_minus_on_break() {
        assert_eq!(snapshot(5, 2, 2).on_duty(), 3);
        assert_eq!(snapshot(0, 0, 0).on_duty(), 0);
    }

    #[test]
    fn below_minimum_when_on_duty_under_threshold() {
        assert!(!snapshot(3, 1, 2).below_minimum());
        assert!(snapshot(3, 2, 2).below_minimum());
        assert!(!snapshot(0, 0, 0).below_minimum());
    }

    #[test]
    fn after_break_start_moves_one_employee() {
        let before = snapshot(3, 1, 2);
        let after = before.after_break_start();
        assert_eq!(after.on_break, 2);
        assert!(after.below_minimum());
    }

    #[test]
    fn after_break_start_never_exceeds_assigned() {
        assert_eq!(snapshot(1, 1, 0).after_break_start().on_break, 1);
    }

    #[test]
    fn summary_carries_derived_fields() {
        let summary = StaffingSummary::from(snapshot(4, 3, 2));
        assert_eq!(summary.on_duty, 1);
        assert!(summary.below_minimum);
    }
}
