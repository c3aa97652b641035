use async_trait::async_trait;
use casting_core::types::DbId;

use super::{Store, StoreResult};
use crate::models::actor::{Actor, ActorOrder, CreateActor, UpdateActor};
use crate::models::movie::{CreateMovie, Movie, MovieOrder, UpdateMovie};
use crate::repositories::{ActorRepo, MovieRepo};
use crate::DbPool;

/// [`Store`] backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_movie(&self, input: &CreateMovie) -> StoreResult<Movie> {
        Ok(MovieRepo::create(&self.pool, input).await?)
    }

    async fn update_movie(&self, id: DbId, input: &UpdateMovie) -> StoreResult<Option<Movie>> {
        Ok(MovieRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_movie(&self, id: DbId) -> StoreResult<bool> {
        Ok(MovieRepo::delete(&self.pool, id).await?)
    }

    async fn find_movie(&self, id: DbId) -> StoreResult<Option<Movie>> {
        Ok(MovieRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_movies(&self, order: MovieOrder) -> StoreResult<Vec<Movie>> {
        Ok(MovieRepo::list(&self.pool, order).await?)
    }

    async fn insert_actor(&self, input: &CreateActor) -> StoreResult<Actor> {
        Ok(ActorRepo::create(&self.pool, input).await?)
    }

    async fn update_actor(&self, id: DbId, input: &UpdateActor) -> StoreResult<Option<Actor>> {
        Ok(ActorRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_actor(&self, id: DbId) -> StoreResult<bool> {
        Ok(ActorRepo::delete(&self.pool, id).await?)
    }

    async fn find_actor(&self, id: DbId) -> StoreResult<Option<Actor>> {
        Ok(ActorRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_actors(&self, order: ActorOrder) -> StoreResult<Vec<Actor>> {
        Ok(ActorRepo::list(&self.pool, order).await?)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn shutdown(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }
}
