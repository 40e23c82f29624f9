//! Server configuration from environment variables, with sane defaults.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::str::FromStr;

use pr_analyzer::{RuleSet, RulesConfig};

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct ServerConfig {
  /// `BIND`; internal only by default.
  pub bind: IpAddr,
  /// `PORT`
  pub port: u16,
  /// `GITHUB_TOKEN`; requests fail with "Missing token configuration" when unset.
  pub github_token: Option<String>,
  /// `GITHUB_API_URL`
  pub github_api_url: String,
  /// `GITHUB_MAX_PAGES`: upper bound on file-list pages (100 files each).
  pub github_max_pages: u32,
  /// `RISK_RULES_PATH`: optional JSON override for the analyzer rule table.
  pub rules_path: Option<PathBuf>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
      port: 5005,
      github_token: None,
      github_api_url: "https://api.github.com".to_string(),
      github_max_pages: 30,
      rules_path: None,
    }
  }
}

impl ServerConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  /// Build from any variable lookup; empty values count as unset.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |name: &str| {
      lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
    };
    let defaults = Self::default();

    Ok(Self {
      bind: parse_or(get("BIND"), "BIND", defaults.bind)?,
      port: parse_or(get("PORT"), "PORT", defaults.port)?,
      github_token: get("GITHUB_TOKEN"),
      github_api_url: get("GITHUB_API_URL").unwrap_or(defaults.github_api_url),
      github_max_pages: parse_or(
        get("GITHUB_MAX_PAGES"),
        "GITHUB_MAX_PAGES",
        defaults.github_max_pages,
      )?,
      rules_path: get("RISK_RULES_PATH").map(PathBuf::from),
    })
  }

  /// Compile the analyzer rules, applying the override file when configured.
  pub fn rule_set(&self) -> Result<RuleSet, ConfigError> {
    let config = match &self.rules_path {
      Some(path) => RulesConfig::from_json_file(path)?,
      None => RulesConfig::default(),
    };
    Ok(RuleSet::compile(&config)?)
  }
}

fn parse_or<T: FromStr>(
  value: Option<String>,
  name: &'static str,
  default: T,
) -> Result<T, ConfigError> {
  match value {
    None => Ok(default),
    Some(v) => v.parse().map_err(|_| ConfigError::Invalid { name, value: v }),
  }
}
