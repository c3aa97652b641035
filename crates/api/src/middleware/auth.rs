//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use casting_core::error::AuthError;

use crate::auth::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(AuthError::missing_header)?
        .to_str()
        .map_err(|_| AuthError::malformed_header("Authorization header is not valid text."))?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        (Some(scheme), _, _) if !scheme.eq_ignore_ascii_case("bearer") => Err(
            AuthError::malformed_header("Authorization header must start with \"Bearer\"."),
        ),
        (Some(_), None, _) => Err(AuthError::malformed_header("Token not found.")),
        _ => Err(AuthError::malformed_header(
            "Authorization header must be bearer token.",
        )),
    }
}

/// The verified caller of a request.
///
/// Prefer [`crate::middleware::rbac::Authorized`] on routes; this extractor
/// only proves the token is valid.
impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).inspect_err(|err| {
            tracing::debug!(code = err.kind.code(), "Rejected authorization header");
        })?;

        state.verifier.verify(token).await.map_err(|err| {
            tracing::debug!(error = %err, "Rejected bearer token");
            AppError::from(err)
        })
    }
}
