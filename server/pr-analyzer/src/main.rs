//! Binary entrypoint: read one JSON document (file list) from stdin, write the report to stdout.
//!
//! Set `PR_ANALYZER_RULES` to a JSON file to override the default rule table.

use pr_analyzer::{AnalyzeInput, Analyzer, RuleSet, RulesConfig};
use std::io::{self, Read, Write};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
  // stderr only; stdout carries the JSON report
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(io::stderr)
    .init();

  if let Err(e) = run_binary() {
    error!("pr-analyzer error: {}", e);
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let config = match std::env::var("PR_ANALYZER_RULES") {
    Ok(path) if !path.is_empty() => {
      info!(%path, "loading rule overrides");
      RulesConfig::from_json_file(&path)?
    }
    _ => RulesConfig::default(),
  };
  let analyzer = Analyzer::new(RuleSet::compile(&config)?);

  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let input: AnalyzeInput = serde_json::from_str(&raw)?;

  let report = analyzer.analyze(&input.into_files());
  let json = serde_json::to_vec(&report)?;
  io::stdout().write_all(&json)?;
  Ok(())
}
