//! Requests that outlive `request_timeout_secs` answer with the 408 envelope.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::header::CONTENT_TYPE;
use casting_core::types::DbId;
use casting_db::models::actor::{Actor, ActorOrder, CreateActor, UpdateActor};
use casting_db::models::movie::{CreateMovie, Movie, MovieOrder, UpdateMovie};
use casting_db::{MemoryStore, Store, StoreResult};
use common::{assert_error, casting_assistant, get_auth, test_config};

/// Delegates to [`MemoryStore`] but stalls on movie listings.
#[derive(Default)]
struct SlowStore {
    inner: MemoryStore,
}

#[async_trait]
impl Store for SlowStore {
    async fn insert_movie(&self, input: &CreateMovie) -> StoreResult<Movie> {
        self.inner.insert_movie(input).await
    }
    async fn update_movie(&self, id: DbId, input: &UpdateMovie) -> StoreResult<Option<Movie>> {
        self.inner.update_movie(id, input).await
    }
    async fn delete_movie(&self, id: DbId) -> StoreResult<bool> {
        self.inner.delete_movie(id).await
    }
    async fn find_movie(&self, id: DbId) -> StoreResult<Option<Movie>> {
        self.inner.find_movie(id).await
    }
    async fn list_movies(&self, order: MovieOrder) -> StoreResult<Vec<Movie>> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        self.inner.list_movies(order).await
    }
    async fn insert_actor(&self, input: &CreateActor) -> StoreResult<Actor> {
        self.inner.insert_actor(input).await
    }
    async fn update_actor(&self, id: DbId, input: &UpdateActor) -> StoreResult<Option<Actor>> {
        self.inner.update_actor(id, input).await
    }
    async fn delete_actor(&self, id: DbId) -> StoreResult<bool> {
        self.inner.delete_actor(id).await
    }
    async fn find_actor(&self, id: DbId) -> StoreResult<Option<Actor>> {
        self.inner.find_actor(id).await
    }
    async fn list_actors(&self, order: ActorOrder) -> StoreResult<Vec<Actor>> {
        self.inner.list_actors(order).await
    }
    async fn health_check(&self) -> StoreResult<()> {
        self.inner.health_check().await
    }
}

fn app() -> axum::Router {
    let mut config = test_config();
    config.request_timeout_secs = 1;
    common::build_test_app_with_config(Arc::new(SlowStore::default()), config).0
}

#[tokio::test]
async fn test_slow_request_returns_408_envelope() {
    let response = get_auth(app(), "/movies", &casting_assistant()).await;
    assert_eq!(
        response.headers()[CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(assert_error(response, 408).await, "Request timeout");
}

#[tokio::test]
async fn test_fast_request_is_unaffected() {
    // Actor listings do not stall; an empty store is a 404, well inside the limit.
    let response = get_auth(app(), "/actors", &casting_assistant()).await;
    assert_eq!(assert_error(response, 404).await, "Not found");
}
