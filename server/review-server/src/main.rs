//! Binary entrypoint for the review server.

use std::net::SocketAddr;
use std::sync::Arc;

use pr_analyzer::Analyzer;
use review_server::{router, AppState, GitHubClient, ServerConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();

  let config = ServerConfig::from_env()?;
  if config.github_token.is_none() {
    warn!("GITHUB_TOKEN is not set; analyze requests will fail");
  }

  let analyzer = Analyzer::new(config.rule_set()?);
  let client = GitHubClient::new(
    &config.github_api_url,
    config.github_token.clone(),
    config.github_max_pages,
  )?;
  let state = Arc::new(AppState::new(client, analyzer));
  let app = router(state);

  let addr = SocketAddr::new(config.bind, config.port);
  let listener = tokio::net::TcpListener::bind(addr).await?;
  info!("review-server listening on http://{}", addr);

  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      tokio::signal::ctrl_c().await.ok();
      info!("shutting down");
    })
    .await?;

  Ok(())
}
