//! Route definitions for learning logs, mounted at `/logs`.
//!
//! ```text
//! GET    /       -> list_logs
//! POST   /       -> create_log
//! GET    /{id}   -> get_log
//! PATCH  /{id}   -> update_log
//! DELETE /{id}   -> delete_log
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::logs;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(logs::list_logs).post(logs::create_log))
        .route(
            "/{id}",
            get(logs::get_log)
                .patch(logs::update_log)
                .delete(logs::delete_log),
        )
}
