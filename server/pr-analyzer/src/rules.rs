//! Risk rule table: size thresholds, path patterns and the untested-code check.
//!
//! `RulesConfig` is plain data (JSON-loadable) so the policy can be tuned
//! without touching the scoring code; `RuleSet` is its compiled form.

use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;
use crate::types::RiskLevel;

/// A filename pattern worth `points` when it matches at least one changed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
  /// Regex, matched case-insensitively.
  pub pattern: String,
  pub points: u32,
  pub reason: String,
}

impl PatternRule {
  pub fn new(pattern: &str, points: u32, reason: &str) -> Self {
    Self {
      pattern: pattern.to_string(),
      points,
      reason: reason.to_string(),
    }
  }
}

/// Tunable scoring policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
  /// File count at which a PR counts as large.
  pub large_pr_files: u64,
  pub large_pr_files_points: u32,
  pub large_pr_files_reason: String,
  /// Churn (additions + deletions) at which a PR counts as large.
  pub large_pr_churn: u64,
  pub large_pr_churn_points: u32,
  pub large_pr_churn_reason: String,
  pub patterns: Vec<PatternRule>,
  /// Extensions (without the dot) treated as source code.
  pub code_extensions: Vec<String>,
  /// Regex identifying test files.
  pub test_pattern: String,
  pub untested_points: u32,
  pub untested_reason: String,
  /// Minimum score for `medium`.
  pub medium_score: u32,
  /// Minimum score for `high`.
  pub high_score: u32,
  /// Length cap for hotspots and biggest files.
  pub top_n: usize,
}

impl Default for RulesConfig {
  fn default() -> Self {
    Self {
      large_pr_files: 25,
      large_pr_files_points: 2,
      large_pr_files_reason: "Large PR: many files changed".to_string(),
      large_pr_churn: 800,
      large_pr_churn_points: 2,
      large_pr_churn_reason: "Large PR: high churn (additions + deletions)".to_string(),
      patterns: vec![
        PatternRule::new(
          r"auth|security|oauth|jwt|password|login",
          3,
          "Touches auth/security related code",
        ),
        PatternRule::new(
          r"migration|migrations|schema|db|database",
          3,
          "Touches database/migrations/schema",
        ),
        PatternRule::new(
          r"github/workflows|ci|terraform|helm|k8s|kubernetes",
          2,
          "Touches CI/infra config",
        ),
        PatternRule::new(
          r"package-lock\.json|yarn\.lock|pnpm-lock\.yaml|requirements\.txt|poetry\.lock",
          2,
          "Touches dependency lockfiles",
        ),
      ],
      code_extensions: ["ts", "tsx", "js", "jsx", "py", "java", "go", "cs", "rb", "php"]
        .iter()
        .map(|s| s.to_string())
        .collect(),
      test_pattern: r"(^|/)(test|tests|__tests__)/|\.spec\.|\.test\.".to_string(),
      untested_points: 2,
      untested_reason: "Code changed but tests were not updated".to_string(),
      medium_score: 3,
      high_score: 6,
      top_n: 8,
    }
  }
}

impl RulesConfig {
  /// Load an override file; keys left out keep their default values.
  pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
  }
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
  pub regex: Regex,
  pub points: u32,
  pub reason: String,
}

/// Compiled rule table, ready for scoring.
#[derive(Debug, Clone)]
pub struct RuleSet {
  config: RulesConfig,
  patterns: Vec<CompiledRule>,
  code_file: Regex,
  test_file: Regex,
}

impl RuleSet {
  pub fn compile(config: &RulesConfig) -> Result<Self, AnalyzerError> {
    let patterns = config
      .patterns
      .iter()
      .map(|rule| {
        Ok(CompiledRule {
          regex: case_insensitive(&rule.pattern)?,
          points: rule.points,
          reason: rule.reason.clone(),
        })
      })
      .collect::<Result<Vec<_>, AnalyzerError>>()?;

    let alternation = config
      .code_extensions
      .iter()
      .map(|ext| regex::escape(ext.trim_start_matches('.')))
      .collect::<Vec<_>>()
      .join("|");
    let code_file = case_insensitive(&format!(r"\.({alternation})$"))?;
    let test_file = case_insensitive(&config.test_pattern)?;

    Ok(Self {
      config: config.clone(),
      patterns,
      code_file,
      test_file,
    })
  }

  pub fn config(&self) -> &RulesConfig {
    &self.config
  }

  pub(crate) fn patterns(&self) -> &[CompiledRule] {
    &self.patterns
  }

  pub fn is_code_file(&self, filename: &str) -> bool {
    !self.config.code_extensions.is_empty() && self.code_file.is_match(filename)
  }

  pub fn is_test_file(&self, filename: &str) -> bool {
    self.test_file.is_match(filename)
  }

  pub fn level_for(&self, score: u32) -> RiskLevel {
    if score >= self.config.high_score {
      RiskLevel::High
    } else if score >= self.config.medium_score {
      RiskLevel::Medium
    } else {
      RiskLevel::Low
    }
  }
}

impl Default for RuleSet {
  fn default() -> Self {
    Self::compile(&RulesConfig::default()).expect("default rules compile")
  }
}

fn case_insensitive(pattern: &str) -> Result<Regex, AnalyzerError> {
  RegexBuilder::new(pattern)
    .case_insensitive(true)
    .build()
    .map_err(|e| AnalyzerError::regex(pattern, e))
}
