//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint in
//! `20240101000001_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EMPLOYEE: &str = "employee";

/// Every role a user row may carry.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EMPLOYEE];

/// Whether `role` names a known role.
pub fn is_known_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles() {
        assert!(is_known_role("admin"));
        assert!(is_known_role("employee"));
        assert!(!is_known_role("manager"));
        assert!(!is_known_role(""));
    }
}
