//! Request/response types for the review server.

use pr_analyzer::{PrSummary, Report};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
  /// Missing is treated like an empty (invalid) URL.
  #[serde(default)]
  pub pr_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
  pub pr: PrSummary,
  pub report: Report,
  pub markdown: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
  pub error: String,
}
