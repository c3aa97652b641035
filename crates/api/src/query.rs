//! Shared query parameter types for API handlers.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use casting_core::pagination::{parse_page, DEFAULT_PAGE};
use casting_core::types::PageNumber;
use serde::Deserialize;

/// Raw `?page=` parameter. Kept as text so a non-numeric value falls back to
/// the first page instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

/// The 1-based page a list or mutation response should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(pub PageNumber);

impl Default for Page {
    fn default() -> Self {
        Page(DEFAULT_PAGE)
    }
}

impl<S> FromRequestParts<S> for Page
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = Query::<PageParams>::from_request_parts(parts, state)
            .await
            .map(|Query(params)| params)
            .unwrap_or_default();
        Ok(Page(parse_page(params.page.as_deref())))
    }
}
