use crate::status::StatusKind;
use crate::types::{DbId, TimeOfDay};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Entity not found: {entity} with code {code}")]
    CodeNotFound { entity: &'static str, code: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A delete was refused because other rows still reference the target.
    #[error("Referential integrity: {0}")]
    ReferentialIntegrity(String),

    #[error("Employee {employee_id} is already assigned to replacement {replacement_id}")]
    DuplicateAssignment {
        employee_id: DbId,
        replacement_id: DbId,
    },

    #[error("Invalid {kind} status '{code}': {reason}")]
    InvalidStatus {
        kind: StatusKind,
        code: String,
        reason: &'static str,
    },

    #[error("Employee {employee_id} is not assigned to replacement {replacement_id}")]
    NotAssigned {
        employee_id: DbId,
        replacement_id: DbId,
    },

    #[error("Invalid interval: end {end} must be after start {start}")]
    InvalidInterval { start: TimeOfDay, end: TimeOfDay },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
