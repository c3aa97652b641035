//! Permission-based access control extractors.
//!
//! A route declares the permission it needs through the type parameter of
//! [`Authorized`]. The check runs while extracting arguments, so it must be
//! the first handler parameter to reject before the path or body is read:
//!
//! ```ignore
//! async fn list(_: Authorized<GetMovies>, State(state): State<AppState>) -> AppResult<...> {
//!     ...
//! }
//! ```

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use casting_core::error::AuthError;
use casting_core::permissions::{self, Permission};

use crate::auth::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// A permission a route requires, declared at the type level.
pub trait RequiredPermission {
    const PERMISSION: Permission;
}

/// A verified caller holding `P::PERMISSION`.
#[derive(Debug)]
pub struct Authorized<P> {
    pub principal: Principal,
    _permission: PhantomData<fn() -> P>,
}

impl<P: RequiredPermission> Authorized<P> {
    /// Check `principal` against the required permission.
    pub fn check(principal: Principal) -> Result<Self, AuthError> {
        if P::PERMISSION.is_granted_by(&principal.permissions) {
            Ok(Self {
                principal,
                _permission: PhantomData,
            })
        } else {
            tracing::warn!(
                subject = principal.subject.as_deref().unwrap_or("-"),
                required = %P::PERMISSION,
                "Permission denied"
            );
            Err(AuthError::insufficient_permission(P::PERMISSION))
        }
    }
}

impl<P> FromRequestParts<AppState> for Authorized<P>
where
    P: RequiredPermission,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = Principal::from_request_parts(parts, state).await?;
        Ok(Self::check(principal)?)
    }
}

macro_rules! permission_markers {
    ($($name:ident => $permission:path,)*) => {
        $(
            #[derive(Debug)]
            pub enum $name {}

            impl RequiredPermission for $name {
                const PERMISSION: Permission = $permission;
            }
        )*
    };
}

// Route markers, one per permission.
permission_markers! {
    GetMovies => permissions::GET_MOVIES,
    PostMovies => permissions::POST_MOVIES,
    PatchMovies => permissions::PATCH_MOVIES,
    DeleteMovies => permissions::DELETE_MOVIES,
    GetActors => permissions::GET_ACTORS,
    PostActors => permissions::POST_ACTORS,
    PatchActors => permissions::PATCH_ACTORS,
    DeleteActors => permissions::DELETE_ACTORS,
}
