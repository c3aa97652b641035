//! Success envelopes for API handlers.
//!
//! Every success body carries `"success": true`. Collection bodies also carry
//! the full collection size; bodies returned from a create or delete name the
//! affected id in `created` / `deleted`.

use casting_core::types::DbId;
use casting_db::models::actor::Actor;
use casting_db::models::movie::Movie;
use serde::Serialize;

/// `{ "success": true, "movies": [...], "total_movies": n }`
#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<DbId>,
    pub movies: Vec<Movie>,
    pub total_movies: usize,
}

impl MoviesResponse {
    pub fn page(movies: Vec<Movie>, total_movies: usize) -> Self {
        Self {
            success: true,
            created: None,
            deleted: None,
            movies,
            total_movies,
        }
    }
}

/// `{ "success": true, "movie": {...} }`
#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub success: bool,
    pub movie: Movie,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        Self {
            success: true,
            movie,
        }
    }
}

/// `{ "success": true, "actors": [...], "total_actors": n }`
#[derive(Debug, Serialize)]
pub struct ActorsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<DbId>,
    pub actors: Vec<Actor>,
    pub total_actors: usize,
}

impl ActorsResponse {
    pub fn page(actors: Vec<Actor>, total_actors: usize) -> Self {
        Self {
            success: true,
            created: None,
            deleted: None,
            actors,
            total_actors,
        }
    }
}

/// `{ "success": true, "actor": {...} }`
#[derive(Debug, Serialize)]
pub struct ActorResponse {
    pub success: bool,
    pub actor: Actor,
}

impl From<Actor> for ActorResponse {
    fn from(actor: Actor) -> Self {
        Self {
            success: true,
            actor,
        }
    }
}
