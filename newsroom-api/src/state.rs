//! Application state shared across handlers

use newsroom_storage::{InMemoryStorage, PostStorage};
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    pub storage: Arc<dyn PostStorage>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_storage(Arc::new(InMemoryStorage::new()))
    }

    /// Create with custom storage backend
    pub fn with_storage(storage: Arc<dyn PostStorage>) -> Self {
        Self { storage }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
