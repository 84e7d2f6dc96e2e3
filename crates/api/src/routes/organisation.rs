use axum::routing::get;
use axum::Router;

use crate::handlers::organisation;
use crate::state::AppState;

/// Routes mounted at `/organisations`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(organisation::list).post(organisation::create))
        .route(
            "/{id}",
            get(organisation::get_by_id)
                .put(organisation::update)
                .delete(organisation::delete),
        )
        .route("/{id}/groups", get(organisation::list_groups))
}
