//! Error types returned by the X API client.

use thiserror::Error;

/// Failures raised while talking to the X API.
///
/// Nothing here is retried by the client; callers decide what to surface.
#[derive(Debug, Error)]
pub enum XError {
  /// The request never produced a response (connection, TLS, timeout).
  #[error("HTTP request failed: {0}")]
  Http(#[from] reqwest::Error),

  /// 401: the credentials were rejected.
  #[error("Unauthorized: {message}")]
  Unauthorized { message: String },

  /// 403: the credentials are valid but the action is not allowed
  /// (missing write permission, duplicate content, suspended account).
  #[error("Forbidden: {message}")]
  Forbidden { message: String },

  /// 429: the rate-limit window is exhausted.
  #[error("Too Many Requests: rate limit exceeded{}", reset_suffix(.reset_at))]
  RateLimited { reset_at: Option<u64> },

  /// Any other non-success status.
  #[error("X API error {status}: {message}")]
  Api { status: u16, message: String },

  /// A success status whose body did not have the expected shape.
  #[error("Unexpected X API response: {0}")]
  InvalidResponse(String),

  /// The OAuth signature could not be produced.
  #[error("OAuth signing failed: {0}")]
  OAuth(String),
}

fn reset_suffix(reset_at: &Option<u64>) -> String {
  reset_at
    .map(|epoch| format!(" (window resets at epoch {epoch})"))
    .unwrap_or_default()
}

/// Result type for X API operations.
pub type XResult<T> = Result<T, XError>;
