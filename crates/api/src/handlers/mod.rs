//! Request handlers for movies and actors.
//!
//! Each submodule provides async handler functions (list, get_by_id, create,
//! update, delete) for one entity type. Handlers talk to the shared
//! [`casting_db::Store`] and map errors via [`AppError`].

pub mod actors;
pub mod movies;

use casting_core::error::CoreError;
use casting_core::validation::describe;
use casting_db::StoreError;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Run field validation, reporting every failing field.
fn validate<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe(&errors)).into())
}

/// A store failure while carrying out a mutation.
fn unprocessable(err: StoreError) -> AppError {
    AppError::Core(CoreError::Unprocessable(err.to_string()))
}
