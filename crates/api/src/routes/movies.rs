//! Route definitions for the `/movies` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::movies;
use crate::state::AppState;

/// Routes for `/movies` and `/movies/{id}`.
///
/// ```text
/// GET    /movies        -> list       get:movies
/// POST   /movies        -> create     post:movies
/// GET    /movies/{id}   -> get_by_id  get:movies
/// PATCH  /movies/{id}   -> update     patch:movies
/// DELETE /movies/{id}   -> delete     delete:movies
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movies", get(movies::list).post(movies::create))
        .route(
            "/movies/{id}",
            get(movies::get_by_id)
                .patch(movies::update)
                .delete(movies::delete),
        )
}
