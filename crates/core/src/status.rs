//! Status dictionaries for the replacement and break workflows.
//!
//! Statuses are rows in `replacement_statuses` / `break_statuses` keyed by a
//! short code. The workflow states are data, not code: the only rules
//! enforced here are code shape, activeness on assignment and sort order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length of a status code (matches `VARCHAR(32)`).
pub const MAX_CODE_LEN: usize = 32;

/// Which of the two independent status dictionaries a code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Replacement,
    Break,
}

impl StatusKind {
    /// Backing table for this dictionary.
    pub fn table(self) -> &'static str {
        match self {
            StatusKind::Replacement => "replacement_statuses",
            StatusKind::Break => "break_statuses",
        }
    }

    /// Tables whose `status` column references this dictionary.
    pub fn referencing_tables(self) -> &'static [&'static str] {
        match self {
            StatusKind::Replacement => &["replacements", "replacement_employees"],
            StatusKind::Break => &["breaks"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusKind::Replacement => "replacement",
            StatusKind::Break => "break",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "replacement" => Ok(StatusKind::Replacement),
            "break" => Ok(StatusKind::Break),
            other => Err(CoreError::Validation(format!(
                "Unknown status kind '{other}', expected 'replacement' or 'break'"
            ))),
        }
    }
}

/// Read access to a dictionary row, implemented by the persistence model.
pub trait StatusEntry {
    fn code(&self) -> &str;
    fn sort(&self) -> i32;
    fn is_active(&self) -> bool;
}

/// Check that `code` is a lowercase slug (`[a-z][a-z0-9_]*`, at most 32 chars).
pub fn validate_status_code(code: &str) -> Result<(), CoreError> {
    if code.is_empty() || code.len() > MAX_CODE_LEN {
        return Err(CoreError::Validation(format!(
            "Status code must be 1 to {MAX_CODE_LEN} characters long"
        )));
    }
    let mut chars = code.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    let rest_ok = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !first_ok || !rest_ok {
        return Err(CoreError::Validation(format!(
            "Status code '{code}' must start with a lowercase letter and contain only \
             lowercase letters, digits and underscores"
        )));
    }
    Ok(())
}

/// Ensure the looked-up status may be assigned to a new or updated record.
///
/// `entry` is the row found for `code`, or `None` if no such row exists.
pub fn ensure_assignable<T: StatusEntry>(
    kind: StatusKind,
    code: &str,
    entry: Option<&T>,
) -> Result<(), CoreError> {
    match entry {
        None => Err(CoreError::InvalidStatus {
            kind,
            code: code.to_string(),
            reason: "unknown status code",
        }),
        Some(e) if !e.is_active() => Err(CoreError::InvalidStatus {
            kind,
            code: code.to_string(),
            reason: "status is inactive",
        }),
        Some(_) => Ok(()),
    }
}

/// The default status for new records: the first active entry by sort order.
///
/// Ties on `sort` are broken by code so the choice is stable.
pub fn initial_status<T: StatusEntry>(entries: &[T]) -> Option<&T> {
    entries
        .iter()
        .filter(|e| e.is_active())
        .min_by(|a, b| a.sort().cmp(&b.sort()).then_with(|| a.code().cmp(b.code())))
}

/// The active entry that follows `current` in sort order.
///
/// `entries` should include inactive rows so an inactive `current` can
/// still be located. Returns `None` when `current` is unknown or is the
/// last active entry.
pub fn next_status<'a, T: StatusEntry>(entries: &'a [T], current: &str) -> Option<&'a T> {
    let current = entries.iter().find(|e| e.code() == current)?;
    let position = (current.sort(), current.code());
    entries
        .iter()
        .filter(|e| e.is_active() && (e.sort(), e.code()) > position)
        .min_by(|a, b| a.sort().cmp(&b.sort()).then_with(|| a.code().cmp(b.code())))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    struct Row {
        code: &'static str,
        sort: i32,
        active: bool,
    }

    impl StatusEntry for Row {
        fn code(&self) -> &str {
            self.code
        }
        fn sort(&self) -> i32 {
            self.sort
        }
        fn is_active(&self) -> bool {
            self.active
        }
    }

    fn row(code: &'static str, sort: i32, active: bool) -> Row {
        Row { code, sort, active }
    }

    #[test]
    fn kind_round_trips_through_str() {
        assert_eq!("replacement".parse::<StatusKind>().unwrap(), StatusKind::Replacement);
        assert_eq!("break".parse::<StatusKind>().unwrap(), StatusKind::Break);
        assert_eq!(StatusKind::Break.to_string(), "break");
    }

    #[test]
    fn unknown_kind_is_validation_error() {
        assert_matches!("lunch".parse::<StatusKind>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn kinds_use_separate_tables() {
        assert_ne!(StatusKind::Replacement.table(), StatusKind::Break.table());
        assert_eq!(StatusKind::Break.referencing_tables(), &["breaks"]);
    }

    #[test]
    fn accepts_slug_codes() {
        assert!(validate_status_code("planned").is_ok());
        assert!(validate_status_code("on_break").is_ok());
        assert!(validate_status_code("step2").is_ok());
    }

    #[test]
    fn rejects_malformed_codes() {
        assert!(validate_status_code("").is_err());
        assert!(validate_status_code("Planned").is_err());
        assert!(validate_status_code("2nd").is_err());
        assert!(validate_status_code("on-break").is_err());
        assert!(validate_status_code(&"a".repeat(MAX_CODE_LEN + 1)).is_err());
    }

    #[test]
    fn unknown_code_is_not_assignable() {
        let result = ensure_assignable::<Row>(StatusKind::Replacement, "ghost", None);
        assert_matches!(
            result,
            Err(CoreError::InvalidStatus { kind: StatusKind::Replacement, ref code, .. }) if code == "ghost"
        );
    }

    #[test]
    fn inactive_code_is_not_assignable() {
        let closed = row("closed", 3, false);
        let result = ensure_assignable(StatusKind::Replacement, "closed", Some(&closed));
        assert_matches!(result, Err(CoreError::InvalidStatus { reason: "status is inactive", .. }));
    }

    #[test]
    fn active_code_is_assignable() {
        let active = row("active", 2, true);
        assert!(ensure_assignable(StatusKind::Break, "active", Some(&active)).is_ok());
    }

    #[test]
    fn initial_status_skips_inactive_and_uses_sort() {
        let rows = vec![
            row("active", 2, true),
            row("draft", 0, false),
            row("planned", 1, true),
        ];
        assert_eq!(initial_status(&rows).map(|r| r.code), Some("planned"));
    }

    #[test]
    fn initial_status_of_all_inactive_is_none() {
        let rows = vec![row("closed", 1, false)];
        assert!(initial_status(&rows).is_none());
    }

    #[test]
    fn next_status_follows_sort_order() {
        let rows = vec![
            row("pending", 10, true),
            row("on_break", 20, true),
            row("finished", 30, true),
        ];
        assert_eq!(next_status(&rows, "pending").map(|r| r.code), Some("on_break"));
        assert_eq!(next_status(&rows, "on_break").map(|r| r.code), Some("finished"));
        assert!(next_status(&rows, "finished").is_none());
        assert!(next_status(&rows, "ghost").is_none());
    }

    #[test]
    fn next_status_skips_inactive_entries() {
        let rows = vec![
            row("pending", 10, false),
            row("on_break", 20, false),
            row("finished", 30, true),
        ];
        assert_eq!(next_status(&rows, "pending").map(|r| r.code), Some("finished"));
    }
}
