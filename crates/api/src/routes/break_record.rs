use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::break_record;
use crate::state::AppState;

/// Routes mounted at `/breaks`.
///
/// ```text
/// GET    /               -> list (?replacement_id, employee_id, limit, offset)
/// GET    /{id}           -> get_by_id
/// DELETE /{id}           -> delete (admin)
/// POST   /{id}/end       -> end
/// PUT    /{id}/status    -> set_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(break_record::list))
        .route(
            "/{id}",
            get(break_record::get_by_id).delete(break_record::delete),
        )
        .route("/{id}/end", post(break_record::end))
        .route("/{id}/status", put(break_record::set_status))
}
