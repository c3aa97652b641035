//! Authentication and authorization extractors.
//!
//! - [`auth::Principal`] extraction -- verifies the `Authorization: Bearer` token.
//! - [`rbac::Authorized`] -- additionally requires one permission, declared by
//!   a marker type such as [`rbac::GetMovies`].

pub mod auth;
pub mod rbac;
