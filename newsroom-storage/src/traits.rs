//! Storage trait defining the interface for persistence

use async_trait::async_trait;
use newsroom_core::Post;

use crate::StorageError;

/// Operations every post backend provides.
///
/// No ordering, pagination or filtering is part of the contract.
#[async_trait]
pub trait PostStorage: Send + Sync {
    /// List all posts
    async fn list(&self) -> Result<Vec<Post>, StorageError>;

    /// Store a new post; the backend assigns its id
    async fn add(&self, post: Post) -> Result<(), StorageError>;

    /// Update the post matching `post.id`
    async fn update(&self, post: Post) -> Result<(), StorageError>;

    /// Delete the post matching `post.id`
    async fn delete(&self, post: Post) -> Result<(), StorageError>;

    /// Release connections held by the backend
    async fn close(&self) {}
}
