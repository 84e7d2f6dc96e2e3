//! Route definitions for the status dictionaries.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::status;
use crate::state::AppState;

/// Routes mounted at `/statuses`. `{kind}` is `replacement` or `break`.
///
/// ```text
/// GET    /{kind}                      -> list (?include_inactive)
/// POST   /{kind}                      -> create (admin)
/// GET    /{kind}/{code}               -> get_by_code
/// PUT    /{kind}/{code}               -> update (admin)
/// DELETE /{kind}/{code}               -> delete (admin, unreferenced only)
/// POST   /{kind}/{code}/deactivate    -> deactivate (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{kind}", get(status::list).post(status::create))
        .route(
            "/{kind}/{code}",
            get(status::get_by_code)
                .put(status::update)
                .delete(status::delete),
        )
        .route("/{kind}/{code}/deactivate", post(status::deactivate))
}
