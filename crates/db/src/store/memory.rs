use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use casting_core::types::DbId;
use tokio::sync::RwLock;

use super::{Store, StoreResult};
use crate::models::actor::{Actor, ActorOrder, CreateActor, UpdateActor};
use crate::models::movie::{CreateMovie, Movie, MovieOrder, UpdateMovie};

/// In-process [`Store`].
///
/// Rows live in id-ordered maps behind a single lock. Ids come from
/// per-table counters that only move forward, so a deleted id is never
/// handed out again (matching `BIGSERIAL`).
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    movies: BTreeMap<DbId, Movie>,
    actors: BTreeMap<DbId, Actor>,
    last_movie_id: DbId,
    last_actor_id: DbId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted<T: Clone>(rows: &BTreeMap<DbId, T>, cmp: impl Fn(&T, &T) -> Ordering) -> Vec<T> {
    // BTreeMap iteration is id-ordered and sort_by is stable, so ties keep id order.
    let mut out: Vec<T> = rows.values().cloned().collect();
    out.sort_by(cmp);
    out
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_movie(&self, input: &CreateMovie) -> StoreResult<Movie> {
        let mut tables = self.tables.write().await;
        tables.last_movie_id += 1;
        let movie = Movie {
            id: tables.last_movie_id,
            title: input.title.clone(),
            release_date: input.release_date.clone(),
        };
        tables.movies.insert(movie.id, movie.clone());
        Ok(movie)
    }

    async fn update_movie(&self, id: DbId, input: &UpdateMovie) -> StoreResult<Option<Movie>> {
        let mut tables = self.tables.write().await;
        Ok(tables.movies.get_mut(&id).map(|movie| {
            input.apply_to(movie);
            movie.clone()
        }))
    }

    async fn delete_movie(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.movies.remove(&id).is_some())
    }

    async fn find_movie(&self, id: DbId) -> StoreResult<Option<Movie>> {
        Ok(self.tables.read().await.movies.get(&id).cloned())
    }

    async fn list_movies(&self, order: MovieOrder) -> StoreResult<Vec<Movie>> {
        let tables = self.tables.read().await;
        Ok(match order {
            MovieOrder::Id => tables.movies.values().cloned().collect(),
            MovieOrder::Title => sorted(&tables.movies, |a, b| a.title.cmp(&b.title)),
        })
    }

    async fn insert_actor(&self, input: &CreateActor) -> StoreResult<Actor> {
        let mut tables = self.tables.write().await;
        tables.last_actor_id += 1;
        let actor = Actor {
            id: tables.last_actor_id,
            name: input.name.clone(),
            age: input.age,
            gender: input.gender.clone(),
        };
        tables.actors.insert(actor.id, actor.clone());
        Ok(actor)
    }

    async fn update_actor(&self, id: DbId, input: &UpdateActor) -> StoreResult<Option<Actor>> {
        let mut tables = self.tables.write().await;
        Ok(tables.actors.get_mut(&id).map(|actor| {
            input.apply_to(actor);
            actor.clone()
        }))
    }

    async fn delete_actor(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.actors.remove(&id).is_some())
    }

    async fn find_actor(&self, id: DbId) -> StoreResult<Option<Actor>> {
        Ok(self.tables.read().await.actors.get(&id).cloned())
    }

    async fn list_actors(&self, order: ActorOrder) -> StoreResult<Vec<Actor>> {
        let tables = self.tables.read().await;
        Ok(match order {
            ActorOrder::Id => tables.actors.values().cloned().collect(),
            ActorOrder::Name => sorted(&tables.actors, |a, b| a.name.cmp(&b.name)),
        })
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
