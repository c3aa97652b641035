//! Store failures surface as 500 on reads and 422 on mutations.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use casting_core::types::DbId;
use casting_db::models::actor::{Actor, ActorOrder, CreateActor, UpdateActor};
use casting_db::models::movie::{CreateMovie, Movie, MovieOrder, UpdateMovie};
use casting_db::{Store, StoreError, StoreResult};
use common::{
    assert_error, body_json, delete_auth, executive_producer, get, get_auth, patch_json_auth,
    post_json_auth,
};
use serde_json::json;

/// A store whose every call fails as if the database were unreachable.
struct UnreachableStore;

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Database(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl Store for UnreachableStore {
    async fn insert_movie(&self, _: &CreateMovie) -> StoreResult<Movie> {
        down()
    }
    async fn update_movie(&self, _: DbId, _: &UpdateMovie) -> StoreResult<Option<Movie>> {
        down()
    }
    async fn delete_movie(&self, _: DbId) -> StoreResult<bool> {
        down()
    }
    async fn find_movie(&self, _: DbId) -> StoreResult<Option<Movie>> {
        down()
    }
    async fn list_movies(&self, _: MovieOrder) -> StoreResult<Vec<Movie>> {
        down()
    }
    async fn insert_actor(&self, _: &CreateActor) -> StoreResult<Actor> {
        down()
    }
    async fn update_actor(&self, _: DbId, _: &UpdateActor) -> StoreResult<Option<Actor>> {
        down()
    }
    async fn delete_actor(&self, _: DbId) -> StoreResult<bool> {
        down()
    }
    async fn find_actor(&self, _: DbId) -> StoreResult<Option<Actor>> {
        down()
    }
    async fn list_actors(&self, _: ActorOrder) -> StoreResult<Vec<Actor>> {
        down()
    }
    async fn health_check(&self) -> StoreResult<()> {
        down()
    }
}

fn app() -> axum::Router {
    common::build_test_app_with_store(Arc::new(UnreachableStore)).0
}

#[tokio::test]
async fn test_read_failures_return_500() {
    let message = assert_error(get_auth(app(), "/movies", &executive_producer()).await, 500).await;
    assert_eq!(message, "Internal server error");
    assert_error(get_auth(app(), "/actors/1", &executive_producer()).await, 500).await;
}

#[tokio::test]
async fn test_create_failure_returns_422() {
    let response = post_json_auth(
        app(),
        "/movies",
        json!({"title": "Arrival", "release_date": "11-11-2016"}),
        &executive_producer(),
    )
    .await;
    assert_eq!(assert_error(response, 422).await, "Unprocessable");
}

#[tokio::test]
async fn test_delete_failure_returns_422() {
    let response = delete_auth(app(), "/actors/1", &executive_producer()).await;
    assert_error(response, 422).await;
}

#[tokio::test]
async fn test_patch_lookup_failure_returns_500() {
    let response = patch_json_auth(
        app(),
        "/movies/1",
        json!({"title": "Heat"}),
        &executive_producer(),
    )
    .await;
    assert_error(response, 500).await;
}

#[tokio::test]
async fn test_health_reports_degraded() {
    let response = get(app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}
