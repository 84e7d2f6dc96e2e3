//! Break window rules for replacements and break records.
//!
//! A replacement defines the window in which its employees may take breaks
//! and a cap on the length of any single break. Break records must start
//! inside that window, end no later than its close and stay within the cap.

use crate::error::CoreError;
use crate::types::{Minutes, TimeOfDay};

/// Validate the window bounds of a replacement.
pub fn validate_window(start: TimeOfDay, end: TimeOfDay) -> Result<(), CoreError> {
    if start >= end {
        return Err(CoreError::Validation(format!(
            "break_start ({start}) must be before break_end ({end})"
        )));
    }
    Ok(())
}

/// Validate the per-break cap of a replacement.
pub fn validate_max_duration(minutes: Minutes) -> Result<(), CoreError> {
    if minutes <= 0 {
        return Err(CoreError::Validation(format!(
            "break_max_duration must be greater than 0, got {minutes}"
        )));
    }
    Ok(())
}

/// Whole minutes between `start` and `end`.
///
/// Fails with [`CoreError::InvalidInterval`] unless `end` is strictly after
/// `start`. Seconds are truncated.
pub fn duration_minutes(start: TimeOfDay, end: TimeOfDay) -> Result<Minutes, CoreError> {
    if end <= start {
        return Err(CoreError::InvalidInterval { start, end });
    }
    let minutes = (end - start).num_minutes();
    // A day has 1440 minutes, so this only fails on corrupt input.
    Minutes::try_from(minutes)
        .map_err(|_| CoreError::Internal(format!("break duration {minutes} out of range")))
}

/// The break window of a single replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub max_duration: Minutes,
}

impl BreakWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay, max_duration: Minutes) -> Result<Self, CoreError> {
        validate_window(start, end)?;
        validate_max_duration(max_duration)?;
        Ok(Self {
            start,
            end,
            max_duration,
        })
    }

    /// A break may start at the window open and strictly before its close.
    pub fn check_start(&self, break_start: TimeOfDay) -> Result<(), CoreError> {
        if break_start < self.start || break_start >= self.end {
            return Err(CoreError::Validation(format!(
                "Break start {break_start} is outside the break window {}-{}",
                self.start, self.end
            )));
        }
        Ok(())
    }

    /// Validate a finished break and return its duration in minutes.
    pub fn check_finished(
        &self,
        break_start: TimeOfDay,
        break_end: TimeOfDay,
    ) -> Result<Minutes, CoreError> {
        let duration = duration_minutes(break_start, break_end)?;
        if break_end > self.end {
            return Err(CoreError::Validation(format!(
                "Break end {break_end} is after the break window closes at {}",
                self.end
            )));
        }
        if duration > self.max_duration {
            return Err(CoreError::Validation(format!(
                "Break lasted {duration} minutes, more than the allowed {} minutes",
                self.max_duration
            )));
        }
        Ok(duration)
    }

    /// Check an already recorded break, open or closed, against this window.
    pub fn check_recorded(
        &self,
        break_start: TimeOfDay,
        break_end: Option<TimeOfDay>,
    ) -> Result<(), CoreError> {
        self.check_start(break_start)?;
        if let Some(end) = break_end {
            self.check_finished(break_start, end)?;
        }
        Ok(())
    }
}
