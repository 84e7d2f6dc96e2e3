pub mod auth;
pub mod break_record;
pub mod group;
pub mod health;
pub mod organisation;
pub mod replacement;
pub mod status;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
///
/// /users                                           list, create (admin only)
/// /users/me                                        current user
///
/// /statuses/{kind}                                 list, create
/// /statuses/{kind}/{code}                          get, update, delete
/// /statuses/{kind}/{code}/deactivate               deactivate (POST)
///
/// /organisations                                   list, create
/// /organisations/{id}                              get, update, delete
/// /organisations/{id}/groups                       list groups
///
/// /groups                                          list, create
/// /groups/{id}                                     get, update, delete
///
/// /replacements                                    list, create
/// /replacements/{id}                               get (with employees), update, delete
/// /replacements/{id}/status                        transition (PUT)
/// /replacements/{id}/staffing                      staffing summary
/// /replacements/{id}/employees                     assign (POST)
/// /replacements/{id}/employees/{employee_id}       unassign (DELETE)
/// /replacements/{id}/employees/{employee_id}/status  set status (PUT)
/// /replacements/{id}/breaks                        list, start
///
/// /breaks                                          list
/// /breaks/{id}                                     get, delete
/// /breaks/{id}/end                                 end (POST)
/// /breaks/{id}/status                              set status (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", user::router())
        .nest("/statuses", status::router())
        .nest("/organisations", organisation::router())
        .nest("/groups", group::router())
        .nest("/replacements", replacement::router())
        .nest("/breaks", break_record::router())
}
