//! Request extractors whose rejections render as the API error envelope.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use casting_core::types::DbId;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body extractor that rejects with a 400 envelope.
///
/// Covers a missing or wrong `Content-Type`, syntactically invalid JSON, and
/// fields of the wrong type or missing required fields.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

/// The integer `{id}` segment of an item route. Non-integer segments are a 404.
#[derive(Debug, Clone, Copy)]
pub struct EntityId(pub DbId);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state).await?;
        Ok(EntityId(id))
    }
}
