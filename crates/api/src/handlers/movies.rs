//! Handlers for the `/movies` resource.

use axum::extract::State;
use axum::Json;
use casting_core::error::CoreError;
use casting_core::pagination::paginate;
use casting_core::types::DbId;
use casting_db::models::movie::{CreateMovie, Movie, MovieOrder, UpdateMovie};

use super::{unprocessable, validate};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, EntityId};
use crate::middleware::rbac::{Authorized, DeleteMovies, GetMovies, PatchMovies, PostMovies};
use crate::query::Page;
use crate::response::{MovieResponse, MoviesResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    CoreError::NotFound { entity: "Movie", id }.into()
}

/// The id-ordered page shown after a create or delete, plus the total count.
async fn page_after_mutation(state: &AppState, Page(page): Page) -> AppResult<(Vec<Movie>, usize)> {
    let movies = state
        .store
        .list_movies(MovieOrder::Id)
        .await
        .map_err(unprocessable)?;
    Ok((paginate(&movies, page).to_vec(), movies.len()))
}

/// GET /movies
pub async fn list(
    _: Authorized<GetMovies>,
    State(state): State<AppState>,
    Page(page): Page,
) -> AppResult<Json<MoviesResponse>> {
    let movies = state.store.list_movies(MovieOrder::Title).await?;
    let current = paginate(&movies, page);
    if current.is_empty() {
        return Err(CoreError::PageNotFound { page }.into());
    }
    Ok(Json(MoviesResponse::page(current.to_vec(), movies.len())))
}

/// GET /movies/{id}
pub async fn get_by_id(
    _: Authorized<GetMovies>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<MovieResponse>> {
    let movie = state.store.find_movie(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(movie.into()))
}

/// POST /movies
pub async fn create(
    _: Authorized<PostMovies>,
    State(state): State<AppState>,
    page: Page,
    AppJson(input): AppJson<CreateMovie>,
) -> AppResult<Json<MoviesResponse>> {
    validate(&input)?;

    let movie = state
        .store
        .insert_movie(&input)
        .await
        .map_err(unprocessable)?;
    tracing::info!(movie_id = movie.id, title = %movie.title, "Movie created");

    let (movies, total) = page_after_mutation(&state, page).await?;
    Ok(Json(MoviesResponse {
        created: Some(movie.id),
        ..MoviesResponse::page(movies, total)
    }))
}

/// PATCH /movies/{id}
pub async fn update(
    _: Authorized<PatchMovies>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    AppJson(input): AppJson<UpdateMovie>,
) -> AppResult<Json<MovieResponse>> {
    if state.store.find_movie(id).await?.is_none() {
        return Err(not_found(id));
    }
    validate(&input)?;

    let movie = state
        .store
        .update_movie(id, &input)
        .await
        .map_err(unprocessable)?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(movie_id = id, "Movie updated");

    Ok(Json(movie.into()))
}

/// DELETE /movies/{id}
///
/// Deleting an id that does not exist is reported as 422, not 404.
pub async fn delete(
    _: Authorized<DeleteMovies>,
    State(state): State<AppState>,
    page: Page,
    EntityId(id): EntityId,
) -> AppResult<Json<MoviesResponse>> {
    let missing = || AppError::from(CoreError::Unprocessable(format!("Movie {id} does not exist")));

    if state
        .store
        .find_movie(id)
        .await
        .map_err(unprocessable)?
        .is_none()
    {
        return Err(missing());
    }
    if !state.store.delete_movie(id).await.map_err(unprocessable)? {
        return Err(missing());
    }
    tracing::info!(movie_id = id, "Movie deleted");

    let (movies, total) = page_after_mutation(&state, page).await?;
    Ok(Json(MoviesResponse {
        deleted: Some(id),
        ..MoviesResponse::page(movies, total)
    }))
}
