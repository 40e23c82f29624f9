//! Errors raised while building a rule set. Analysis itself never fails.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
  #[error("invalid rule pattern {pattern:?}: {source}")]
  Regex {
    pattern: String,
    #[source]
    source: regex::Error,
  },

  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl AnalyzerError {
  pub fn regex(pattern: &str, source: regex::Error) -> Self {
    Self::Regex {
      pattern: pattern.to_string(),
      source,
    }
  }
}
