//! Storage error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Author with id {0} does not exist")]
    AuthorNotFound(i64),

    #[error("No fields to update")]
    NoFieldsToUpdate,

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Failed to seed post '{title}': {source}")]
    Seed {
        title: String,
        #[source]
        source: Box<StorageError>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
