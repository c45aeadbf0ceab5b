//! Test doubles shared by the integration and BDD suites
#![allow(dead_code)]

use async_trait::async_trait;
use newsroom_core::Post;
use newsroom_storage::{PostStorage, StorageError};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

/// Keeps posts in a vector and hands out sequential ids
#[derive(Default)]
pub struct RecordingStorage {
    posts: Mutex<Vec<Post>>,
    next_id: AtomicI64,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStorage for RecordingStorage {
    async fn list(&self) -> Result<Vec<Post>, StorageError> {
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn add(&self, post: Post) -> Result<(), StorageError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.posts.lock().unwrap().push(post.with_id(id));
        Ok(())
    }

    async fn update(&self, post: Post) -> Result<(), StorageError> {
        let mut posts = self.posts.lock().unwrap();
        if let Some(existing) = posts.iter_mut().find(|p| p.id == post.id) {
            *existing = post;
        }
        Ok(())
    }

    async fn delete(&self, post: Post) -> Result<(), StorageError> {
        self.posts.lock().unwrap().retain(|p| p.id != post.id);
        Ok(())
    }
}

/// Fails every call with a query error
pub struct FailingStorage;

#[async_trait]
impl PostStorage for FailingStorage {
    async fn list(&self) -> Result<Vec<Post>, StorageError> {
        Err(StorageError::Query("database is unreachable".to_string()))
    }

    async fn add(&self, post: Post) -> Result<(), StorageError> {
        Err(StorageError::AuthorNotFound(post.author_id))
    }

    async fn update(&self, _post: Post) -> Result<(), StorageError> {
        Err(StorageError::NoFieldsToUpdate)
    }

    async fn delete(&self, _post: Post) -> Result<(), StorageError> {
        Err(StorageError::Query("database is unreachable".to_string()))
    }
}
