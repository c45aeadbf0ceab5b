//! Error types for the core crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl CoreError {
    /// Human-readable validation messages, empty for other variants
    pub fn messages(&self) -> &[String] {
        match self {
            CoreError::Validation(messages) => messages,
            _ => &[],
        }
    }
}
