pub mod health;
pub mod logs;
pub mod notes;
pub mod themes;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree, mounted at the application root.
///
/// Route hierarchy:
///
/// ```text
/// /themes            list, create
/// /themes/{id}       get, patch, delete
///
/// /logs              list, create
/// /logs/{id}         get, patch, delete
///
/// /notes             list, create
/// /notes/{id}        get, patch, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/themes", themes::router())
        .nest("/logs", logs::router())
        .nest("/notes", notes::router())
}
