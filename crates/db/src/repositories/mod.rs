//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods that take part in multi-statement workflows accept any
//! [`sqlx::PgExecutor`] so they can run on a pool or inside a transaction;
//! the rest take `&PgPool` as the first argument.

pub mod break_repo;
pub mod group_repo;
pub mod organisation_repo;
pub mod replacement_employee_repo;
pub mod replacement_repo;
pub mod session_repo;
pub mod status_repo;
pub mod user_repo;

pub use break_repo::BreakRepo;
pub use group_repo::GroupRepo;
pub use organisation_repo::OrganisationRepo;
pub use replacement_employee_repo::ReplacementEmployeeRepo;
pub use replacement_repo::ReplacementRepo;
pub use session_repo::SessionRepo;
pub use status_repo::StatusRepo;
pub use user_repo::UserRepo;

/// Default page size for paginated lists.
pub const DEFAULT_LIMIT: i64 = 50;

/// Largest page size a caller may request.
pub const MAX_LIMIT: i64 = 500;

/// Clamp a requested page size into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(clamp_limit(None), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(10_000)), MAX_LIMIT);
        assert_eq!(clamp_limit(Some(25)), 25);
    }

    #[test]
    fn offset_is_never_negative() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-3)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }
}
