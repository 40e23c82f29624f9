//! HTTP handlers for the review server.

use std::sync::Arc;

use axum::{
  extract::{rejection::JsonRejection, State},
  Json,
};
use pr_analyzer::render_markdown;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::github::PullRequestSource;
use crate::pr_url::parse_pr_url;
use crate::state::AppState;
use crate::types::{AnalyzeRequest, AnalyzeResponse};

pub async fn health() -> &'static str {
  "ok"
}

pub async fn analyze<S: PullRequestSource>(
  State(state): State<Arc<AppState<S>>>,
  payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
  let Json(payload) = payload.inspect_err(|e| warn!(error = %e, "analyze: bad request body"))?;
  let pr_ref = match parse_pr_url(&payload.pr_url) {
    Ok(r) => r,
    Err(e) => {
      warn!(url = %payload.pr_url, "analyze: rejected PR URL");
      return Err(e);
    }
  };

  let (pr, files) = tokio::try_join!(
    state.source.fetch_pull(&pr_ref),
    state.source.fetch_files(&pr_ref)
  )
  .inspect_err(|e| warn!(pr = %pr_ref, error = %e, "analyze: fetch failed"))?;

  let report = state.analyzer.analyze(&files);
  let markdown = render_markdown(&pr, &report);

  info!(
    pr = %pr_ref,
    files = report.metrics.total_files,
    churn = report.metrics.churn,
    score = report.risk.score,
    level = %report.risk.level,
    "analyze: done"
  );

  Ok(Json(AnalyzeResponse {
    pr,
    report,
    markdown,
  }))
}
