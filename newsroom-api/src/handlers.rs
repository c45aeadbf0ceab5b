//! API request handlers

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use newsroom_core::Post;
use std::sync::Arc;

use crate::{ApiError, AppState};

/// Malformed JSON is reported as a 500 carrying the decoder's message.
fn decode_post(body: &Bytes) -> Result<Post, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

/// List all posts
pub async fn list_posts(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let posts = state.storage.list().await?;
    Ok(Json(posts))
}

/// Create a post
pub async fn add_post(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let post = decode_post(&body)?;
    post.validate_for_create()?;

    let title = post.title.clone();
    state.storage.add(post).await?;

    tracing::info!("Created post '{}'", title);
    Ok(StatusCode::OK)
}

/// Update the post named by `id`
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let post = decode_post(&body)?;
    post.validate_for_update()?;

    let id = post.id;
    state.storage.update(post).await?;

    tracing::info!("Updated post {}", id);
    Ok(StatusCode::OK)
}

/// Delete the post named by `id`
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let post = decode_post(&body)?;

    let id = post.id;
    state.storage.delete(post).await?;

    tracing::info!("Deleted post {}", id);
    Ok(StatusCode::OK)
}

/// Bare OPTIONS requests without CORS headers
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
