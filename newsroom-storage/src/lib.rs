//! Storage layer for Newsroom
//!
//! Provides persistence for posts.
//! Supports a static in-memory store (for demos), PostgreSQL and MongoDB backends.

pub mod error;
pub mod memory;
pub mod seed;
pub mod traits;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "mongodb")]
pub mod mongo;

pub use error::StorageError;
pub use memory::InMemoryStorage;
pub use seed::seed_posts;
pub use traits::PostStorage;

#[cfg(feature = "postgres")]
pub use postgres::PostgresStorage;

#[cfg(feature = "mongodb")]
pub use mongo::{MongoConfig, MongoStorage};
