//! PR Review Analyzer — rule-based scoring of a pull request's changed files;
//! no AI, no DB, no network.
//! Used by the binary for stdin/stdout and by the review server as a library.

pub mod error;
pub mod hotspot;
pub mod markdown;
pub mod rules;
pub mod score;
pub mod types;

use tracing::debug;

pub use error::AnalyzerError;
pub use markdown::render_markdown;
pub use rules::{PatternRule, RuleSet, RulesConfig};
pub use types::{
  AnalyzeInput, FileChange, FileStatus, Hotspot, Metrics, PrSummary, Report, RiskAssessment,
  RiskLevel,
};

/// Holds a compiled rule set. Stateless between calls, so one instance can
/// serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
  rules: RuleSet,
}

impl Analyzer {
  pub fn new(rules: RuleSet) -> Self {
    Self { rules }
  }

  pub fn rules(&self) -> &RuleSet {
    &self.rules
  }

  /// Run the analysis (no I/O).
  pub fn analyze(&self, files: &[FileChange]) -> Report {
    let top_n = self.rules.config().top_n;
    let metrics = score::compute_metrics(files);
    let risk = score::assess_risk(files, &metrics, &self.rules);
    let hotspots = hotspot::compute_hotspots(files, top_n);
    let biggest_files = score::biggest_files(files, top_n);

    debug!(
      files = metrics.total_files,
      churn = metrics.churn,
      score = risk.score,
      level = %risk.level,
      "analysis complete"
    );

    Report {
      metrics,
      risk,
      hotspots,
      biggest_files,
    }
  }
}

/// Analyze with the built-in rule table.
pub fn analyze(files: &[FileChange]) -> Report {
  Analyzer::default().analyze(files)
}
