//! Core domain models for Newsroom
//!
//! This crate contains the `Post` entity shared by the storage backends
//! and the HTTP layer, together with its field validation rules.

pub mod error;
pub mod models;

pub use error::CoreError;
pub use models::*;
