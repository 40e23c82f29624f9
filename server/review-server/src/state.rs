//! Shared handler state.

use pr_analyzer::Analyzer;

use crate::github::PullRequestSource;

pub struct AppState<S> {
  pub source: S,
  pub analyzer: Analyzer,
}

impl<S: PullRequestSource> AppState<S> {
  pub fn new(source: S, analyzer: Analyzer) -> Self {
    Self { source, analyzer }
  }
}
