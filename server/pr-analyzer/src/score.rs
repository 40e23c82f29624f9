//! Metrics, biggest files and the additive risk score.

use tracing::debug;

use crate::rules::RuleSet;
use crate::types::{FileChange, Metrics, RiskAssessment};

pub fn compute_metrics(files: &[FileChange]) -> Metrics {
  let additions = files.iter().map(|f| f.additions).fold(0, u64::saturating_add);
  let deletions = files.iter().map(|f| f.deletions).fold(0, u64::saturating_add);
  Metrics {
    total_files: files.len() as u64,
    additions,
    deletions,
    churn: additions.saturating_add(deletions),
  }
}

/// Top `n` files by `changes`, descending; ties keep input order.
pub fn biggest_files(files: &[FileChange], n: usize) -> Vec<FileChange> {
  let mut sorted = files.to_vec();
  sorted.sort_by(|a, b| b.changes.cmp(&a.changes));
  sorted.truncate(n);
  sorted
}

/// Score the PR. Reasons are appended in a fixed order: file count, churn,
/// each path pattern in table order, then the untested-code check.
pub fn assess_risk(files: &[FileChange], metrics: &Metrics, rules: &RuleSet) -> RiskAssessment {
  let cfg = rules.config();
  let mut score = 0u32;
  let mut reasons = Vec::new();

  if metrics.total_files >= cfg.large_pr_files {
    score = score.saturating_add(cfg.large_pr_files_points);
    reasons.push(cfg.large_pr_files_reason.clone());
  }
  if metrics.churn >= cfg.large_pr_churn {
    score = score.saturating_add(cfg.large_pr_churn_points);
    reasons.push(cfg.large_pr_churn_reason.clone());
  }

  let joined = files
    .iter()
    .map(|f| f.filename.as_str())
    .collect::<Vec<_>>()
    .join("\n");
  for rule in rules.patterns() {
    if rule.regex.is_match(&joined) {
      debug!(pattern = rule.regex.as_str(), points = rule.points, "risk pattern matched");
      score = score.saturating_add(rule.points);
      reasons.push(rule.reason.clone());
    }
  }

  let touches_code = files.iter().any(|f| rules.is_code_file(&f.filename));
  let touches_tests = files.iter().any(|f| rules.is_test_file(&f.filename));
  if touches_code && !touches_tests {
    score = score.saturating_add(cfg.untested_points);
    reasons.push(cfg.untested_reason.clone());
  }

  RiskAssessment {
    level: rules.level_for(score),
    score,
    reasons,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::rules::{PatternRule, RulesConfig};
  use crate::types::RiskLevel;

  fn file(name: &str, additions: u64, deletions: u64) -> FileChange {
    FileChange {
      filename: name.to_string(),
      additions,
      deletions,
      changes: additions.saturating_add(deletions),
      ..FileChange::default()
    }
  }

  fn risk(files: &[FileChange]) -> RiskAssessment {
    let rules = RuleSet::default();
    assess_risk(files, &compute_metrics(files), &rules)
  }

  #[test]
  fn metrics_sum_fields() {
    let m = compute_metrics(&[file("a", 3, 1), file("b", 10, 0)]);
    assert_eq!(m.total_files, 2);
    assert_eq!(m.additions, 13);
    assert_eq!(m.deletions, 1);
    assert_eq!(m.churn, 14);
  }

  #[test]
  fn metrics_saturate_on_huge_counts() {
    let files = [file("a", u64::MAX, 0), file("b", 5, u64::MAX)];
    let m = compute_metrics(&files);
    assert_eq!(m.additions, u64::MAX);
    assert_eq!(m.deletions, u64::MAX);
    assert_eq!(m.churn, u64::MAX);
    let r = assess_risk(&files, &m, &RuleSet::default());
    assert_eq!(r.reasons, vec!["Large PR: high churn (additions + deletions)"]);
  }

  #[test]
  fn biggest_files_is_stable() {
    let files = vec![file("a", 1, 0), file("b", 5, 0), file("c", 1, 0), file("d", 5, 0)];
    let names: Vec<_> = biggest_files(&files, 8).into_iter().map(|f| f.filename).collect();
    assert_eq!(names, vec!["b", "d", "a", "c"]);
    assert_eq!(biggest_files(&files, 2).len(), 2);
  }

  #[test]
  fn reasons_follow_evaluation_order() {
    let mut files: Vec<_> = (0..25).map(|i| file(&format!("docs/p{i}.md"), 40, 0)).collect();
    files.push(file("db/migrations/001.sql", 1, 0));
    files.push(file("src/auth/session.ts", 1, 0));
    files.push(file("yarn.lock", 1, 0));
    let r = risk(&files);
    assert_eq!(
      r.reasons,
      vec![
        "Large PR: many files changed",
        "Large PR: high churn (additions + deletions)",
        "Touches auth/security related code",
        "Touches database/migrations/schema",
        "Touches dependency lockfiles",
        "Code changed but tests were not updated",
      ]
    );
    assert_eq!(r.score, 2 + 2 + 3 + 3 + 2 + 2);
    assert_eq!(r.level, RiskLevel::High);
  }

  #[test]
  fn tests_present_suppress_untested_reason() {
    let r = risk(&[file("src/app.py", 5, 0), file("tests/test_app.py", 5, 0)]);
    assert!(r.reasons.is_empty(), "{:?}", r.reasons);
    assert_eq!(r.level, RiskLevel::Low);
  }

  #[test]
  fn ci_and_infra_paths() {
    let r = risk(&[file(".github/workflows/build.yml", 1, 0)]);
    assert_eq!(r.reasons, vec!["Touches CI/infra config"]);
    assert_eq!(r.score, 2);
  }

  #[test]
  fn pattern_match_is_case_insensitive() {
    let r = risk(&[file("Docs/OAuth.md", 1, 0)]);
    assert_eq!(r.reasons, vec!["Touches auth/security related code"]);
  }

  #[test]
  fn thresholds_are_inclusive() {
    let r = risk(&[file("notes.txt", 800, 0)]);
    assert_eq!(r.reasons, vec!["Large PR: high churn (additions + deletions)"]);
    let r = risk(&[file("notes.txt", 799, 0)]);
    assert!(r.reasons.is_empty());
  }

  #[test]
  fn reduced_rule_set_is_injectable() {
    let rules = RuleSet::compile(&RulesConfig {
      patterns: vec![PatternRule::new(r"\.proto$", 4, "Touches API contracts")],
      code_extensions: Vec::new(),
      ..RulesConfig::default()
    })
    .unwrap();
    let files = vec![file("api/user.proto", 1, 0), file("src/auth.ts", 1, 0)];
    let r = assess_risk(&files, &compute_metrics(&files), &rules);
    assert_eq!(r.reasons, vec!["Touches API contracts"]);
    assert_eq!(r.score, 4);
    assert_eq!(r.level, RiskLevel::Medium);
  }
}
