//! Operations that span several repositories.
//!
//! Each function owns its transaction: rows that gate the operation are
//! locked with `FOR UPDATE`, domain rules from `callhelper_core` run against
//! the locked state, and the write commits only when every check passed.

pub mod breaks;
pub mod replacements;
pub mod statuses;
pub mod users;
