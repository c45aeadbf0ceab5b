//! Core domain models

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Current time as seconds since the Unix epoch
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// A published article
///
/// Every field falls back to its zero value when missing from the request
/// body, so a client may send only the fields an operation cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    /// Identifier assigned by the backend on creation
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Must reference an existing author (checked by the relational backend)
    pub author_id: i64,
    /// Denormalized author name, filled in by the backend on read
    pub author_name: String,
    /// Seconds since epoch
    pub created_at: i64,
    /// Seconds since epoch
    pub published_at: i64,
}

impl Post {
    pub fn new(title: impl Into<String>, content: impl Into<String>, author_id: i64) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author_id,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_author_name(mut self, author_name: impl Into<String>) -> Self {
        self.author_name = author_name.into();
        self
    }

    /// Stamp both timestamps with the same instant
    pub fn with_timestamps(mut self, timestamp: i64) -> Self {
        self.created_at = timestamp;
        self.published_at = timestamp;
        self
    }

    /// Check the fields required to create a post.
    ///
    /// All failures are collected, in field order.
    pub fn validate_for_create(&self) -> Result<(), CoreError> {
        let mut errors = Vec::new();

        if self.title.is_empty() {
            errors.push("post title must not be empty".to_string());
        }
        if self.content.is_empty() {
            errors.push("post content must not be empty".to_string());
        }
        if self.author_id <= 0 {
            errors.push("author id must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(errors))
        }
    }

    /// Check the fields required to update a post
    pub fn validate_for_update(&self) -> Result<(), CoreError> {
        if self.id <= 0 {
            return Err(CoreError::Validation(vec![
                "post id must be positive".to_string(),
            ]));
        }
        Ok(())
    }
}

/// Fields to change on an existing post.
///
/// `None` leaves the stored column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostUpdate {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<i64>,
    pub created_at: Option<i64>,
    pub published_at: Option<i64>,
}

impl PostUpdate {
    /// Whether no column would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.author_id.is_none()
            && self.created_at.is_none()
            && self.published_at.is_none()
    }
}

/// Zero and empty values in the post mean "leave unchanged".
/// A post therefore cannot be used to clear a field.
impl From<&Post> for PostUpdate {
    fn from(post: &Post) -> Self {
        fn non_empty(value: &str) -> Option<String> {
            (!value.is_empty()).then(|| value.to_string())
        }
        fn non_zero(value: i64) -> Option<i64> {
            (value != 0).then_some(value)
        }

        Self {
            id: post.id,
            title: non_empty(&post.title),
            content: non_empty(&post.content),
            author_id: non_zero(post.author_id),
            created_at: non_zero(post.created_at),
            published_at: non_zero(post.published_at),
        }
    }
}
