//! In-memory storage implementation for demos and testing

use async_trait::async_trait;
use newsroom_core::Post;

use crate::{PostStorage, StorageError};

/// Static storage that always serves the same two posts.
///
/// Writes are accepted and discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct InMemoryStorage;

impl InMemoryStorage {
    pub fn new() -> Self {
        Self
    }
}

fn fixed_posts() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            title: "Effective Go".to_string(),
            content: "wololo".to_string(),
            ..Post::default()
        },
        Post {
            id: 2,
            title: "The Go Memory Model".to_string(),
            content: "The Go memory model specifies the conditions under which reads of a \
                      variable in one goroutine can be guaranteed to observe values produced \
                      by writes to the same variable in a different goroutine."
                .to_string(),
            ..Post::default()
        },
    ]
}

#[async_trait]
impl PostStorage for InMemoryStorage {
    async fn list(&self) -> Result<Vec<Post>, StorageError> {
        Ok(fixed_posts())
    }

    async fn add(&self, _post: Post) -> Result<(), StorageError> {
        Ok(())
    }

    async fn update(&self, _post: Post) -> Result<(), StorageError> {
        Ok(())
    }

    async fn delete(&self, _post: Post) -> Result<(), StorageError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_returns_two_fixed_posts() {
        let storage = InMemoryStorage::new();
        let posts = storage.list().await.unwrap();

        let ids: Vec<_> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(posts[0].title, "Effective Go");
    }

    #[tokio::test]
    async fn test_mutations_do_not_change_listing() {
        let storage = InMemoryStorage::new();
        let before = storage.list().await.unwrap();

        storage.add(Post::new("New", "post", 1)).await.unwrap();
        storage
            .update(Post::new("Changed", "", 0).with_id(1))
            .await
            .unwrap();
        storage.delete(Post::default().with_id(2)).await.unwrap();

        let after = storage.list().await.unwrap();
        assert_eq!(before, after);
        assert_eq!(after.len(), 2);
    }
}
