//! Newsroom API Server
//!
//! REST API for listing, creating, updating and deleting posts.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

pub use cli::{Backend, Cli};
pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use state::AppState;

use axum::{
    http::Method,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]);

    Router::new()
        .route(
            "/posts",
            get(handlers::list_posts)
                .post(handlers::add_post)
                .put(handlers::update_post)
                .delete(handlers::delete_post)
                .options(handlers::preflight),
        )
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(app_state)
}
