//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod break_record;
pub mod group;
pub mod organisation;
pub mod replacement;
pub mod replacement_employee;
pub mod session;
pub mod status;
pub mod user;
