//! GitHub pull request URL parsing.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ApiError;

static PR_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^https?://(?:www\.)?github\.com/([^/\s?#]+)/([^/\s?#]+)/pull/(\d+)(?:[/?#]\S*)?$")
    .expect("valid regex")
});

/// Owner, repository and number of one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrRef {
  pub owner: String,
  pub repo: String,
  pub number: u64,
}

impl fmt::Display for PrRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
  }
}

/// Parse `https://github.com/{owner}/{repo}/pull/{number}`, allowing trailing
/// path segments (`/files`, `/commits`), a query or a fragment.
pub fn parse_pr_url(url: &str) -> Result<PrRef, ApiError> {
  let caps = PR_URL_RE.captures(url.trim()).ok_or(ApiError::InvalidInput)?;
  let number: u64 = caps[3].parse().map_err(|_| ApiError::InvalidInput)?;
  if number == 0 {
    return Err(ApiError::InvalidInput);
  }
  Ok(PrRef {
    owner: caps[1].to_string(),
    repo: caps[2].to_string(),
    number,
  })
}
