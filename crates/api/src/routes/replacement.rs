//! Route definitions for the `/replacements` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::replacement;
use crate::state::AppState;

/// Routes mounted at `/replacements`.
///
/// ```text
/// GET    /                                     -> list (?group_id, date, status, limit, offset)
/// POST   /                                     -> create (admin)
/// GET    /{id}                                 -> get_by_id (with employees)
/// PUT    /{id}                                 -> update (admin)
/// DELETE /{id}                                 -> delete (admin)
/// PUT    /{id}/status                          -> set_status (admin)
/// GET    /{id}/staffing                        -> staffing
/// POST   /{id}/employees                       -> assign_employee (admin)
/// DELETE /{id}/employees/{employee_id}         -> unassign_employee (admin)
/// PUT    /{id}/employees/{employee_id}/status  -> set_employee_status (admin)
/// GET    /{id}/breaks                          -> list_breaks
/// POST   /{id}/breaks                          -> start_break
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(replacement::list).post(replacement::create))
        .route(
            "/{id}",
            get(replacement::get_by_id)
                .put(replacement::update)
                .delete(replacement::delete),
        )
        .route("/{id}/status", put(replacement::set_status))
        .route("/{id}/staffing", get(replacement::staffing))
        .route("/{id}/employees", post(replacement::assign_employee))
        .route(
            "/{id}/employees/{employee_id}",
            delete(replacement::unassign_employee),
        )
        .route(
            "/{id}/employees/{employee_id}/status",
            put(replacement::set_employee_status),
        )
        .route(
            "/{id}/breaks",
            get(replacement::list_breaks).post(replacement::start_break),
        )
}
