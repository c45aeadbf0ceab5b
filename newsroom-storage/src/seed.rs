//! Sample data for a fresh document store

use newsroom_core::{unix_now, Post};

use crate::{PostStorage, StorageError};

fn sample_posts() -> Vec<Post> {
    let now = unix_now();
    vec![
        Post::new("First post", "Contents of the first post.", 1)
            .with_author_name("Author 1")
            .with_timestamps(now),
        Post::new("Second post", "Contents of the second post.", 2)
            .with_author_name("Author 2")
            .with_timestamps(now),
        Post::new("Third post", "Contents of the third post.", 3)
            .with_author_name("Author 3")
            .with_timestamps(now),
    ]
}

/// Insert the three sample posts.
///
/// A failed insert does not stop the batch; every failure is returned.
pub async fn seed_posts(storage: &dyn PostStorage) -> Vec<StorageError> {
    let mut errors = Vec::new();

    for post in sample_posts() {
        let title = post.title.clone();
        match storage.add(post).await {
            Ok(()) => tracing::info!("Seeded post '{}'", title),
            Err(e) => {
                tracing::warn!("Failed to seed post '{}': {}", title, e);
                errors.push(StorageError::Seed {
                    title,
                    source: Box::new(e),
                });
            }
        }
    }

    errors
}
