use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use casting_core::error::{AuthError, CoreError};
use casting_db::StoreError;
use serde::Serialize;

use crate::auth::{KeySetError, VerifyError};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{success, error, message}`
/// envelope every failing request receives.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `casting_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store failure on a read path. Mutations map store failures to
    /// [`CoreError::Unprocessable`] instead.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The signing keys could not be fetched.
    #[error("Key set error: {0}")]
    KeySet(#[from] KeySetError),

    /// Malformed request input (body, content type, field types).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route or no resource at this path.
    #[error("Not found")]
    NotFound,

    /// The path exists but does not accept this method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: status.as_u16(),
            message: message.into(),
        }
    }

    /// Envelope with the fixed message for `status`.
    pub fn for_status(status: StatusCode) -> Self {
        Self::new(status, default_message(status))
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, axum::Json(self)).into_response()
    }
}

/// Client-facing message for statuses that do not carry their own.
pub fn default_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Bad request",
        StatusCode::NOT_FOUND => "Not found",
        StatusCode::METHOD_NOT_ALLOWED => "Method not allowed",
        StatusCode::UNPROCESSABLE_ENTITY => "Unprocessable",
        StatusCode::REQUEST_TIMEOUT => "Request timeout",
        _ => "Internal server error",
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Core(CoreError::Auth(err))
    }
}

impl From<VerifyError> for AppError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::Rejected(auth) => auth.into(),
            VerifyError::KeySet(keys) => keys.into(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            // Only integer ids are routed; anything else is an unknown resource.
            PathRejection::FailedToDeserializePathParams(_) => AppError::NotFound,
            other => AppError::InternalError(other.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id, "Entity not found");
                    StatusCode::NOT_FOUND
                }
                CoreError::PageNotFound { page } => {
                    tracing::debug!(page, "Page out of range");
                    StatusCode::NOT_FOUND
                }
                CoreError::Validation(msg) => {
                    tracing::debug!(error = %msg, "Validation failed");
                    StatusCode::BAD_REQUEST
                }
                CoreError::Unprocessable(msg) => {
                    tracing::warn!(error = %msg, "Unprocessable request");
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                CoreError::Auth(auth) => {
                    let status = StatusCode::from_u16(auth.status_code())
                        .unwrap_or(StatusCode::UNAUTHORIZED);
                    return ErrorEnvelope::new(status, auth.description.clone())
                        .into_response_with(status);
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },

            // --- Infrastructure errors ---
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::KeySet(err) => {
                tracing::error!(error = %err, "Key set error");
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                tracing::debug!(error = %msg, "Bad request");
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        ErrorEnvelope::for_status(status).into_response_with(status)
    }
}
