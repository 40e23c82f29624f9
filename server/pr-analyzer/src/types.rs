//! Input/output types for the analyzer (JSON contract with the server and the CLI).

use serde::{Deserialize, Serialize};

/// One changed file as reported by the GitHub "list pull request files" API.
/// Missing fields default (empty name, zero counts); unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChange {
  pub filename: String,
  pub additions: u64,
  pub deletions: u64,
  pub changes: u64,
  pub status: FileStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
  Added,
  Removed,
  #[default]
  Modified,
  Renamed,
  Copied,
  Changed,
  Unchanged,
  #[serde(other)]
  Other,
}

/// Input for the binary: a bare array of files, or `{ "files": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AnalyzeInput {
  Files(Vec<FileChange>),
  Wrapped { files: Vec<FileChange> },
}

impl AnalyzeInput {
  pub fn into_files(self) -> Vec<FileChange> {
    match self {
      Self::Files(files) | Self::Wrapped { files } => files,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
  pub total_files: u64,
  pub additions: u64,
  pub deletions: u64,
  /// additions + deletions
  pub churn: u64,
}

/// Churn summed over a top-level directory (see `hotspot::directory_key`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotspot {
  pub dir: String,
  pub churn: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
  #[default]
  Low,
  Medium,
  High,
}

impl RiskLevel {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high",
    }
  }
}

impl std::fmt::Display for RiskLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
  pub level: RiskLevel,
  pub score: u32,
  /// In rule evaluation order.
  pub reasons: Vec<String>,
}

/// Output: one JSON object per analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
  pub metrics: Metrics,
  pub risk: RiskAssessment,
  pub hotspots: Vec<Hotspot>,
  pub biggest_files: Vec<FileChange>,
}

/// Pull request header shown at the top of the Markdown summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrSummary {
  pub title: String,
  pub url: String,
  pub author: String,
  /// `owner/name`
  pub repo: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn file_change_defaults_missing_fields() {
    let f: FileChange = serde_json::from_str(r#"{"filename":"a.ts","additions":3}"#).unwrap();
    assert_eq!(f.filename, "a.ts");
    assert_eq!(f.additions, 3);
    assert_eq!(f.deletions, 0);
    assert_eq!(f.changes, 0);
    assert_eq!(f.status, FileStatus::Modified);
  }

  #[test]
  fn github_payload_extra_fields_and_unknown_status() {
    let json = r#"{
      "sha": "abc", "filename": "src/x.rs", "status": "mystery",
      "additions": 1, "deletions": 2, "changes": 3, "patch": "@@ -1 +1 @@"
    }"#;
    let f: FileChange = serde_json::from_str(json).unwrap();
    assert_eq!(f.status, FileStatus::Other);
    assert_eq!(f.changes, 3);
  }

  #[test]
  fn analyze_input_accepts_both_shapes() {
    let bare: AnalyzeInput = serde_json::from_str(r#"[{"filename":"a"}]"#).unwrap();
    let wrapped: AnalyzeInput = serde_json::from_str(r#"{"files":[{"filename":"a"}]}"#).unwrap();
    assert_eq!(bare.into_files().len(), 1);
    assert_eq!(wrapped.into_files().len(), 1);
  }

  #[test]
  fn report_uses_camel_case_keys() {
    let json = serde_json::to_value(Report::default()).unwrap();
    assert!(json.get("biggestFiles").is_some());
    assert!(json["metrics"].get("totalFiles").is_some());
    assert_eq!(json["risk"]["level"], "low");
  }
}
