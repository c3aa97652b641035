//! Handlers for the `/actors` resource.

use axum::extract::State;
use axum::Json;
use casting_core::error::CoreError;
use casting_core::pagination::paginate;
use casting_core::types::DbId;
use casting_db::models::actor::{Actor, ActorOrder, CreateActor, UpdateActor};

use super::{unprocessable, validate};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, EntityId};
use crate::middleware::rbac::{Authorized, DeleteActors, GetActors, PatchActors, PostActors};
use crate::query::Page;
use crate::response::{ActorResponse, ActorsResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    CoreError::NotFound { entity: "Actor", id }.into()
}

/// The id-ordered page shown after a create or delete, plus the total count.
async fn page_after_mutation(state: &AppState, Page(page): Page) -> AppResult<(Vec<Actor>, usize)> {
    let actors = state
        .store
        .list_actors(ActorOrder::Id)
        .await
        .map_err(unprocessable)?;
    Ok((paginate(&actors, page).to_vec(), actors.len()))
}

/// GET /actors
pub async fn list(
    _: Authorized<GetActors>,
    State(state): State<AppState>,
    Page(page): Page,
) -> AppResult<Json<ActorsResponse>> {
    let actors = state.store.list_actors(ActorOrder::Name).await?;
    let current = paginate(&actors, page);
    if current.is_empty() {
        return Err(CoreError::PageNotFound { page }.into());
    }
    Ok(Json(ActorsResponse::page(current.to_vec(), actors.len())))
}

/// GET /actors/{id}
pub async fn get_by_id(
    _: Authorized<GetActors>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<ActorResponse>> {
    let actor = state.store.find_actor(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(actor.into()))
}

/// POST /actors
pub async fn create(
    _: Authorized<PostActors>,
    State(state): State<AppState>,
    page: Page,
    AppJson(input): AppJson<CreateActor>,
) -> AppResult<Json<ActorsResponse>> {
    validate(&input)?;

    let actor = state
        .store
        .insert_actor(&input)
        .await
        .map_err(unprocessable)?;
    tracing::info!(actor_id = actor.id, name = %actor.name, "Actor created");

    let (actors, total) = page_after_mutation(&state, page).await?;
    Ok(Json(ActorsResponse {
        created: Some(actor.id),
        ..ActorsResponse::page(actors, total)
    }))
}

/// PATCH /actors/{id}
pub async fn update(
    _: Authorized<PatchActors>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    AppJson(input): AppJson<UpdateActor>,
) -> AppResult<Json<ActorResponse>> {
    if state.store.find_actor(id).await?.is_none() {
        return Err(not_found(id));
    }
    validate(&input)?;

    let actor = state
        .store
        .update_actor(id, &input)
        .await
        .map_err(unprocessable)?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(actor_id = id, "Actor updated");

    Ok(Json(actor.into()))
}

/// DELETE /actors/{id}
///
/// Deleting an id that does not exist is reported as 422, not 404.
pub async fn delete(
    _: Authorized<DeleteActors>,
    State(state): State<AppState>,
    page: Page,
    EntityId(id): EntityId,
) -> AppResult<Json<ActorsResponse>> {
    let missing = || AppError::from(CoreError::Unprocessable(format!("Actor {id} does not exist")));

    if state
        .store
        .find_actor(id)
        .await
        .map_err(unprocessable)?
        .is_none()
    {
        return Err(missing());
    }
    if !state.store.delete_actor(id).await.map_err(unprocessable)? {
        return Err(missing());
    }
    tracing::info!(actor_id = id, "Actor deleted");

    let (actors, total) = page_after_mutation(&state, page).await?;
    Ok(Json(ActorsResponse {
        deleted: Some(id),
        ..ActorsResponse::page(actors, total)
    }))
}
