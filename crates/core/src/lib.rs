//! Casting agency domain logic.
//!
//! Pure, I/O-free building blocks shared by the persistence and HTTP crates:
//! identifiers, the error taxonomy, the permission table, page slicing and
//! field validators.

pub mod error;
pub mod pagination;
pub mod permissions;
pub mod types;
pub mod validation;
