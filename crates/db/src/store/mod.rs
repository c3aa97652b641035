//! Store trait: the persistence seam the HTTP layer is written against.
//!
//! [`PgStore`] is the production backend; [`MemoryStore`] keeps everything in
//! process and backs the HTTP test-suite.

mod memory;
mod postgres;

use async_trait::async_trait;
use casting_core::types::DbId;

use crate::models::actor::{Actor, ActorOrder, CreateActor, UpdateActor};
use crate::models::movie::{CreateMovie, Movie, MovieOrder, UpdateMovie};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Failure reported by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent storage for movies and actors.
///
/// Every mutating call commits on its own; there are no transactions spanning
/// calls. Implementations must be thread-safe and are shared across requests.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    // Movies

    /// Insert a movie and return it with its assigned id.
    async fn insert_movie(&self, input: &CreateMovie) -> StoreResult<Movie>;

    /// Apply the present fields of `input`. `None` if the id does not exist.
    async fn update_movie(&self, id: DbId, input: &UpdateMovie) -> StoreResult<Option<Movie>>;

    /// Delete a movie. `false` if the id does not exist.
    async fn delete_movie(&self, id: DbId) -> StoreResult<bool>;

    async fn find_movie(&self, id: DbId) -> StoreResult<Option<Movie>>;

    async fn list_movies(&self, order: MovieOrder) -> StoreResult<Vec<Movie>>;

    // Actors

    /// Insert an actor and return it with its assigned id.
    async fn insert_actor(&self, input: &CreateActor) -> StoreResult<Actor>;

    /// Apply the present fields of `input`. `None` if the id does not exist.
    async fn update_actor(&self, id: DbId, input: &UpdateActor) -> StoreResult<Option<Actor>>;

    /// Delete an actor. `false` if the id does not exist.
    async fn delete_actor(&self, id: DbId) -> StoreResult<bool>;

    async fn find_actor(&self, id: DbId) -> StoreResult<Option<Actor>>;

    async fn list_actors(&self, order: ActorOrder) -> StoreResult<Vec<Actor>>;

    // Lifecycle

    /// Verify the backend is reachable.
    async fn health_check(&self) -> StoreResult<()>;

    /// Release backend resources. Called once after the server stops.
    async fn shutdown(&self) {}
}
