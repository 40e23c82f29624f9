//! PR Review Server
//!
//! HTTP service that takes a GitHub pull request URL, fetches the PR's changed
//! files and returns the analyzer report plus a Markdown review summary.
//! Bind to 127.0.0.1 by default (internal only).

pub mod config;
pub mod error;
pub mod github;
mod handlers;
pub mod pr_url;
mod state;
pub mod types;

use std::sync::Arc;

use axum::{
  routing::{get, post},
  Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::{ApiError, ConfigError};
pub use github::{GitHubClient, PullRequestSource};
pub use handlers::{analyze, health};
pub use pr_url::{parse_pr_url, PrRef};
pub use state::AppState;

/// Routes: `GET /health`, `POST /api/analyze`.
pub fn router<S: PullRequestSource>(state: Arc<AppState<S>>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/api/analyze", post(analyze::<S>))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
