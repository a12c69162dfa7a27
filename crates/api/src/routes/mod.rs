pub mod health;
pub mod ship;

use axum::Router;

use crate::state::AppState;

/// Build the `/rest` route tree.
///
/// ```text
/// /ships          GET list, POST create
/// /ships/count    GET count
/// /ships/{id}     GET get, POST update, DELETE delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(ship::router())
}
