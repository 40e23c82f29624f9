//! GitHub REST client: pull request metadata and the paginated changed-file list.

use std::future::Future;

use pr_analyzer::{FileChange, PrSummary};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::pr_url::PrRef;

/// Page size for the "list pull request files" endpoint (GitHub's maximum).
pub const FILES_PER_PAGE: usize = 100;

/// Where PR data comes from. The server uses `GitHubClient`; tests plug in stubs.
pub trait PullRequestSource: Send + Sync + 'static {
  fn fetch_pull(&self, pr: &PrRef) -> impl Future<Output = Result<PrSummary, ApiError>> + Send;

  /// Every changed file of the PR, across all pages.
  fn fetch_files(
    &self,
    pr: &PrRef,
  ) -> impl Future<Output = Result<Vec<FileChange>, ApiError>> + Send;
}

/// Request pages 1, 2, ... until one comes back short of `per_page`
/// or `max_pages` have been read.
pub async fn collect_pages<T, F, Fut>(
  per_page: usize,
  max_pages: u32,
  mut fetch_page: F,
) -> Result<Vec<T>, ApiError>
where
  F: FnMut(u32) -> Fut,
  Fut: Future<Output = Result<Vec<T>, ApiError>>,
{
  let mut all = Vec::new();
  for page in 1..=max_pages {
    let batch = fetch_page(page).await?;
    let len = batch.len();
    all.extend(batch);
    if len < per_page {
      return Ok(all);
    }
  }
  warn!(max_pages, items = all.len(), "stopped paginating at page limit");
  Ok(all)
}

#[derive(Deserialize)]
struct PullPayload {
  title: String,
  html_url: String,
  user: Option<UserPayload>,
  base: BasePayload,
}

#[derive(Deserialize)]
struct UserPayload {
  login: String,
}

#[derive(Deserialize)]
struct BasePayload {
  repo: RepoPayload,
}

#[derive(Deserialize)]
struct RepoPayload {
  full_name: String,
}

#[derive(Deserialize)]
struct GitHubErrorBody {
  message: String,
}

impl From<PullPayload> for PrSummary {
  fn from(p: PullPayload) -> Self {
    Self {
      title: p.title,
      url: p.html_url,
      author: p.user.map(|u| u.login).unwrap_or_else(|| "ghost".to_string()),
      repo: p.base.repo.full_name,
    }
  }
}

pub struct GitHubClient {
  http: reqwest::Client,
  api_base: String,
  token: Option<String>,
  max_pages: u32,
}

impl GitHubClient {
  pub fn new(api_base: &str, token: Option<String>, max_pages: u32) -> Result<Self, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
    headers.insert("X-GitHub-Api-Version", HeaderValue::from_static("2022-11-28"));
    headers.insert(USER_AGENT, HeaderValue::from_static("pr-review-server"));
    let http = reqwest::Client::builder().default_headers(headers).build()?;

    Ok(Self {
      http,
      api_base: api_base.trim_end_matches('/').to_string(),
      token,
      max_pages,
    })
  }

  fn token(&self) -> Result<&str, ApiError> {
    self.token.as_deref().ok_or(ApiError::MissingCredential)
  }

  async fn get_json<T: DeserializeOwned>(
    &self,
    url: &str,
    query: &[(&str, String)],
  ) -> Result<T, ApiError> {
    let token = self.token()?;
    debug!(%url, ?query, "GET");
    let response = self
      .http
      .get(url)
      .query(query)
      .header(AUTHORIZATION, format!("Bearer {token}"))
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      let message = serde_json::from_str::<GitHubErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or_else(|_| format!("GitHub API error {status}"));
      warn!(%url, status = status.as_u16(), %message, "GitHub request failed");
      return Err(ApiError::upstream(status.as_u16(), message));
    }

    Ok(response.json().await?)
  }

  async fn files_page(&self, pr: &PrRef, page: u32) -> Result<Vec<FileChange>, ApiError> {
    let url = format!(
      "{}/repos/{}/{}/pulls/{}/files",
      self.api_base, pr.owner, pr.repo, pr.number
    );
    self
      .get_json(
        &url,
        &[
          ("per_page", FILES_PER_PAGE.to_string()),
          ("page", page.to_string()),
        ],
      )
      .await
  }
}

impl PullRequestSource for GitHubClient {
  async fn fetch_pull(&self, pr: &PrRef) -> Result<PrSummary, ApiError> {
    let url = format!(
      "{}/repos/{}/{}/pulls/{}",
      self.api_base, pr.owner, pr.repo, pr.number
    );
    let payload: PullPayload = self.get_json(&url, &[]).await?;
    Ok(payload.into())
  }

  async fn fetch_files(&self, pr: &PrRef) -> Result<Vec<FileChange>, ApiError> {
    // Fail before the first request rather than once per page.
    self.token()?;
    collect_pages(FILES_PER_PAGE, self.max_pages, move |page| self.files_page(pr, page)).await
  }
}
