//! MongoDB storage implementation
//!
//! Posts are plain documents in the `posts` collection, keyed by an integer
//! `id` field rather than Mongo's own `_id`. Ids come from a counter
//! document in `counters` that is bumped atomically before every insert.
//! The bump and the insert are separate operations, so a crash between them
//! leaves a gap in the id sequence; ids are never reused.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use newsroom_core::Post;
use serde::{Deserialize, Serialize};
use tokio_stream::StreamExt;

use crate::{PostStorage, StorageError};

const POSTS_COLLECTION: &str = "posts";
const COUNTERS_COLLECTION: &str = "counters";
const POST_COUNTER_ID: &str = "postID";
const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// MongoDB connection configuration
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "newsroom".to_string(),
        }
    }
}

/// Sequence document in the `counters` collection
#[derive(Debug, Serialize, Deserialize)]
struct Counter {
    #[serde(rename = "_id")]
    id: String,
    seq: i64,
}

/// MongoDB storage for posts
pub struct MongoStorage {
    client: Client,
    posts: Collection<Post>,
    counters: Collection<Counter>,
}

impl MongoStorage {
    /// Connect, verify the server answers a ping, and make sure the post
    /// counter exists
    pub async fn connect(config: MongoConfig) -> Result<Self, StorageError> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|e| StorageError::Connection(format!("Failed to connect to MongoDB: {}", e)))?;

        let database = client.database(&config.database);

        tokio::time::timeout(PING_TIMEOUT, database.run_command(doc! { "ping": 1 }))
            .await
            .map_err(|_| {
                StorageError::Connection(format!("MongoDB ping timed out after {:?}", PING_TIMEOUT))
            })?
            .map_err(|e| StorageError::Connection(format!("MongoDB ping failed: {}", e)))?;

        let counters = database.collection::<Counter>(COUNTERS_COLLECTION);
        counters
            .update_one(
                doc! { "_id": POST_COUNTER_ID },
                doc! { "$setOnInsert": { "seq": 0_i64 } },
            )
            .upsert(true)
            .await
            .map_err(|e| StorageError::Internal(format!("Failed to create post counter: {}", e)))?;

        tracing::info!(
            "Connected to MongoDB at {}, database: {}",
            config.uri,
            config.database
        );

        Ok(Self {
            posts: database.collection::<Post>(POSTS_COLLECTION),
            counters,
            client,
        })
    }

    /// Atomically increment the post counter and return the new value
    async fn next_id(&self) -> Result<i64, StorageError> {
        let counter = self
            .counters
            .find_one_and_update(
                doc! { "_id": POST_COUNTER_ID },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get next post id: {}", e)))?
            .ok_or_else(|| StorageError::Internal("Post counter is missing".to_string()))?;

        Ok(counter.seq)
    }
}

#[async_trait]
impl PostStorage for MongoStorage {
    async fn list(&self) -> Result<Vec<Post>, StorageError> {
        let mut cursor = self
            .posts
            .find(doc! {})
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list posts: {}", e)))?;

        let mut posts = Vec::new();
        while let Some(post) = cursor.next().await {
            let post =
                post.map_err(|e| StorageError::Query(format!("Failed to read post: {}", e)))?;
            posts.push(post);
        }

        Ok(posts)
    }

    async fn add(&self, post: Post) -> Result<(), StorageError> {
        let id = self.next_id().await?;
        let post = post.with_id(id);

        self.posts
            .insert_one(post)
            .await
            .map_err(|e| StorageError::Query(format!("Failed to add post: {}", e)))?;

        tracing::debug!("Added post {}", id);
        Ok(())
    }

    async fn update(&self, post: Post) -> Result<(), StorageError> {
        let id = post.id;

        self.posts
            .update_one(
                doc! { "id": id },
                doc! {
                    "$set": {
                        "title": post.title,
                        "content": post.content,
                        "author_id": post.author_id,
                        "author_name": post.author_name,
                        "created_at": post.created_at,
                        "published_at": post.published_at,
                    }
                },
            )
            .await
            .map_err(|e| StorageError::Query(format!("Failed to update post: {}", e)))?;

        tracing::debug!("Updated post {}", id);
        Ok(())
    }

    async fn delete(&self, post: Post) -> Result<(), StorageError> {
        self.posts
            .delete_one(doc! { "id": post.id })
            .await
            .map_err(|e| StorageError::Query(format!("Failed to delete post: {}", e)))?;

        tracing::debug!("Deleted post {}", post.id);
        Ok(())
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("Closed MongoDB client");
    }
}
