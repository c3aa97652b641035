//! Bearer-token verification.
//!
//! - [`jwks`] -- JSON Web Key Set retrieval and caching.
//! - [`jwt`] -- Token decoding and claim validation.

pub mod jwks;
pub mod jwt;

use casting_core::error::AuthError;

pub use jwks::{KeySetError, KeyStore};
pub use jwt::{Principal, TokenVerifier};

/// Why a token could not be turned into a [`Principal`].
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The token itself is unacceptable; reported to the client.
    #[error(transparent)]
    Rejected(#[from] AuthError),

    /// The signing keys could not be retrieved; an infrastructure fault.
    #[error(transparent)]
    KeySet(#[from] KeySetError),
}
