pub mod actors;
pub mod health;
pub mod movies;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /movies              list, create
/// /movies/{id}         get, update (PATCH), delete
///
/// /actors              list, create
/// /actors/{id}         get, update (PATCH), delete
/// ```
///
/// Every route requires a bearer token carrying the route's permission.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(movies::router())
        .merge(actors::router())
}
