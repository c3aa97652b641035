use crate::types::{DbId, PageNumber};

/// Domain-level failures shared by the store and HTTP layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Page {page} is out of range")]
    PageNotFound { page: PageNumber },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// The sub-step of bearer-token verification that rejected a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// No `Authorization` header on the request.
    MissingHeader,
    /// Header present but not of the form `Bearer <token>`.
    MalformedHeader,
    /// Unknown signing key, disallowed algorithm or bad signature.
    InvalidSignature,
    /// The `exp` claim is in the past.
    Expired,
    /// Audience or issuer do not match the configured identity provider.
    InvalidClaims,
    /// Token or claims could not be decoded, or the `permissions` claim is absent.
    MalformedPayload,
    /// Token is valid but does not carry the route's permission.
    InsufficientPermission,
}

impl AuthErrorKind {
    /// HTTP status code reported for this kind of failure.
    pub fn status_code(self) -> u16 {
        match self {
            AuthErrorKind::MalformedPayload => 400,
            AuthErrorKind::InsufficientPermission => 403,
            AuthErrorKind::MissingHeader
            | AuthErrorKind::MalformedHeader
            | AuthErrorKind::InvalidSignature
            | AuthErrorKind::Expired
            | AuthErrorKind::InvalidClaims => 401,
        }
    }

    /// Stable machine-readable code, logged alongside the description.
    pub fn code(self) -> &'static str {
        match self {
            AuthErrorKind::MissingHeader => "authorization_header_missing",
            AuthErrorKind::MalformedHeader => "invalid_header",
            AuthErrorKind::InvalidSignature => "invalid_signature",
            AuthErrorKind::Expired => "token_expired",
            AuthErrorKind::InvalidClaims => "invalid_claims",
            AuthErrorKind::MalformedPayload => "invalid_payload",
            AuthErrorKind::InsufficientPermission => "unauthorized",
        }
    }
}

/// A rejected authorization attempt.
///
/// Carries its own status code and client-facing description; the HTTP layer
/// renders both verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{description}")]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub description: String,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn missing_header() -> Self {
        Self::new(
            AuthErrorKind::MissingHeader,
            "Authorization header is expected.",
        )
    }

    pub fn malformed_header(description: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::MalformedHeader, description)
    }

    pub fn insufficient_permission(permission: impl std::fmt::Display) -> Self {
        Self::new(
            AuthErrorKind::InsufficientPermission,
            format!("Permission not found: {permission}"),
        )
    }
}
