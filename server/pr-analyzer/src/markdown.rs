//! Markdown review summary.

use std::fmt::Write;

use crate::types::{PrSummary, Report};

pub const NO_RISK_FLAGS: &str = "No major risk flags detected";

/// Render a fixed-structure Markdown document for a PR and its report.
pub fn render_markdown(pr: &PrSummary, report: &Report) -> String {
  let mut out = String::new();
  let m = &report.metrics;
  let risk = &report.risk;

  // Writing into a String cannot fail.
  let _ = writeln!(out, "# PR Review Summary: {}", pr.title);
  let _ = writeln!(out);
  let _ = writeln!(out, "- Repository: {}", pr.repo);
  let _ = writeln!(out, "- Author: @{}", pr.author);
  let _ = writeln!(out, "- URL: {}", pr.url);

  let _ = writeln!(out, "\n## Metrics\n");
  let _ = writeln!(out, "- Files changed: {}", m.total_files);
  let _ = writeln!(out, "- Additions: +{}", m.additions);
  let _ = writeln!(out, "- Deletions: -{}", m.deletions);
  let _ = writeln!(out, "- Churn: {}", m.churn);

  let _ = writeln!(out, "\n## Risk\n");
  let _ = writeln!(
    out,
    "**{}** (score: {})\n",
    risk.level.as_str().to_uppercase(),
    risk.score
  );
  if risk.reasons.is_empty() {
    let _ = writeln!(out, "- {NO_RISK_FLAGS}");
  }
  for reason in &risk.reasons {
    let _ = writeln!(out, "- {reason}");
  }

  let _ = writeln!(out, "\n## Hotspots\n");
  if report.hotspots.is_empty() {
    let _ = writeln!(out, "- None");
  }
  for h in &report.hotspots {
    let _ = writeln!(out, "- {}: {}", h.dir, h.churn);
  }

  let _ = writeln!(out, "\n## Biggest changed files\n");
  if report.biggest_files.is_empty() {
    let _ = writeln!(out, "- None");
  }
  for f in &report.biggest_files {
    let _ = writeln!(
      out,
      "- `{}` (+{}/-{}, changes: {})",
      f.filename, f.additions, f.deletions, f.changes
    );
  }

  out
}
