//! Route definitions for the `/actors` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::actors;
use crate::state::AppState;

/// Routes for `/actors` and `/actors/{id}`.
///
/// ```text
/// GET    /actors        -> list       get:actors
/// POST   /actors        -> create     post:actors
/// GET    /actors/{id}   -> get_by_id  get:actors
/// PATCH  /actors/{id}   -> update     patch:actors
/// DELETE /actors/{id}   -> delete     delete:actors
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/actors", get(actors::list).post(actors::create))
        .route(
            "/actors/{id}",
            get(actors::get_by_id)
                .patch(actors::update)
                .delete(actors::delete),
        )
}
