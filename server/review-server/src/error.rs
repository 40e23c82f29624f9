//! Error types for the review server and their HTTP mapping.

use axum::{
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;

use crate::types::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Invalid GitHub PR URL")]
  InvalidInput,

  /// Request body was not a JSON object of the expected shape.
  #[error("{}", .0.body_text())]
  Body(#[from] JsonRejection),

  #[error("Missing token configuration")]
  MissingCredential,

  /// Non-2xx answer from GitHub; `message` is GitHub's own error text when available.
  #[error("{message}")]
  Upstream { status: u16, message: String },

  #[error("GitHub request failed: {0}")]
  Transport(#[from] reqwest::Error),
}

impl ApiError {
  pub fn upstream(status: u16, message: impl Into<String>) -> Self {
    Self::Upstream {
      status,
      message: message.into(),
    }
  }

  pub fn status_code(&self) -> StatusCode {
    match self {
      Self::InvalidInput => StatusCode::BAD_REQUEST,
      Self::Body(rejection) => rejection.status(),
      Self::MissingCredential | Self::Upstream { .. } | Self::Transport(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status_code();
    (status, Json(ErrorBody { error: self.to_string() })).into_response()
  }
}

/// Problems reading `ServerConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid {name}: {value:?}")]
  Invalid { name: &'static str, value: String },

  #[error("rules: {0}")]
  Rules(#[from] pr_analyzer::AnalyzerError),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_codes() {
    assert_eq!(ApiError::InvalidInput.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
      ApiError::MissingCredential.status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
      ApiError::upstream(404, "Not Found").status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn upstream_message_is_passed_through() {
    let err = ApiError::upstream(403, "API rate limit exceeded");
    assert_eq!(err.to_string(), "API rate limit exceeded");
  }
}
