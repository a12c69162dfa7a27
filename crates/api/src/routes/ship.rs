//! Route definitions for ships.

use axum::routing::get;
use axum::Router;

use crate::handlers::ship;
use crate::state::AppState;

/// Routes mounted at `/ships`.
///
/// ```text
/// GET    /ships        -> list
/// POST   /ships        -> create
/// GET    /ships/count  -> count
/// GET    /ships/{id}   -> get_by_id
/// POST   /ships/{id}   -> update
/// DELETE /ships/{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ships", get(ship::list).post(ship::create))
        .route("/ships/count", get(ship::count))
        .route(
            "/ships/{id}",
            get(ship::get_by_id).post(ship::update).delete(ship::delete),
        )
}
