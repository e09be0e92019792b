//! # X HTTP Client
//!
//! HTTP client implementation for X API interactions, handling OAuth 1.0a
//! signing, request building, and mapping of error responses.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use crate::consts::{API_BASE_URL, RATE_LIMIT_RESET_HEADER, REQUEST_TIMEOUT, USER_AGENT};
use crate::error::{XError, XResult};
use crate::models::{ApiErrorBody, XCredentials};
use crate::oauth::OAuthSigner;

/// Represents an authenticated X API client
pub struct XClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  signer: OAuthSigner,
}

impl XClient {
  /// Create a new X client for the given user-context credentials.
  ///
  /// # Errors
  ///
  /// Returns an error if the underlying HTTP client cannot be built.
  pub fn new(credentials: XCredentials) -> XResult<Self> {
    let client = Client::builder()
      .timeout(REQUEST_TIMEOUT)
      .user_agent(USER_AGENT)
      .build()?;

    Ok(Self {
      client,
      base_url: API_BASE_URL.to_string(),
      signer: OAuthSigner::new(credentials),
    })
  }

  /// Point the client at a different API host (used for tests and proxies).
  #[must_use]
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into().trim_end_matches('/').to_string();
    self
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Start a signed request against `endpoint` (a path such as `/2/tweets`).
  pub(crate) fn signed(&self, method: Method, endpoint: &str) -> XResult<RequestBuilder> {
    let url = format!("{}{}", self.base_url, endpoint);
    trace!("X API URL: {}", url);

    let authorization = self.signer.authorization(method.as_str(), &url, &[])?;

    Ok(
      self
        .client
        .request(method, &url)
        .header(header::AUTHORIZATION, authorization),
    )
  }
}

/// Decode a success body or translate an error status into [`XError`].
pub(crate) async fn read_response<T: DeserializeOwned>(response: Response) -> XResult<T> {
  let status = response.status();
  debug!("X API response status: {}", status);

  let reset_at = response
    .headers()
    .get(RATE_LIMIT_RESET_HEADER)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.parse::<u64>().ok());

  let body = response.bytes().await?;

  if status.is_success() {
    return serde_json::from_slice(&body).map_err(|e| XError::InvalidResponse(e.to_string()));
  }

  let message = serde_json::from_slice::<ApiErrorBody>(&body)
    .ok()
    .and_then(|b| b.summary())
    .unwrap_or_else(|| {
      let text = String::from_utf8_lossy(&body).trim().to_string();
      if text.is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
      } else {
        text
      }
    });

  match status {
    StatusCode::UNAUTHORIZED => {
      warn!("X API rejected the credentials: {}", message);
      Err(XError::Unauthorized { message })
    }
    StatusCode::FORBIDDEN => {
      warn!("X API refused the request: {}", message);
      Err(XError::Forbidden { message })
    }
    StatusCode::TOO_MANY_REQUESTS => {
      warn!("X API rate limit exceeded (reset: {:?})", reset_at);
      Err(XError::RateLimited { reset_at })
    }
    _ => {
      warn!("Unexpected X API error: HTTP {} - {}", status, message);
      Err(XError::Api {
        status: status.as_u16(),
        message,
      })
    }
  }
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{header_exists, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  fn test_credentials() -> XCredentials {
    XCredentials {
      api_key: "test_key".to_string(),
      api_key_secret: "test_key_secret".to_string(),
      access_token: "test_token".to_string(),
      access_token_secret: "test_token_secret".to_string(),
    }
  }

  #[test]
  fn test_x_client_creation() -> XResult<()> {
    let client = XClient::new(test_credentials())?;
    assert_eq!(client.base_url(), "https://api.twitter.com");

    let client = client.with_base_url("http://localhost:1234/");
    assert_eq!(client.base_url(), "http://localhost:1234");
    Ok(())
  }

  #[tokio::test]
  async fn test_signed_request_carries_oauth_header() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = XClient::new(test_credentials())?.with_base_url(mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/2/ping"))
      .and(header_exists("authorization"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let response = client.signed(Method::GET, "/2/ping")?.send().await?;
    let body: serde_json::Value = read_response(response).await?;
    assert_eq!(body["ok"], true);

    let requests = mock_server.received_requests().await.unwrap_or_default();
    let auth = requests[0]
      .headers
      .get("authorization")
      .and_then(|v| v.to_str().ok())
      .unwrap_or_default()
      .to_string();
    assert!(auth.starts_with("OAuth "));
    assert!(auth.contains(r#"oauth_consumer_key="test_key""#));
    assert!(auth.contains(r#"oauth_token="test_token""#));
    Ok(())
  }

  #[tokio::test]
  async fn test_error_status_mapping() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = XClient::new(test_credentials())?.with_base_url(mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/2/unauthorized"))
      .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
        "title": "Unauthorized",
        "type": "about:blank",
        "status": 401,
        "detail": "Unauthorized"
      })))
      .mount(&mock_server)
      .await;

    Mock::given(method("GET"))
      .and(path("/2/limited"))
      .respond_with(
        ResponseTemplate::new(429)
          .insert_header("x-rate-limit-reset", "1700000000")
          .set_body_json(serde_json::json!({ "title": "Too Many Requests", "status": 429 })),
      )
      .mount(&mock_server)
      .await;

    Mock::given(method("GET"))
      .and(path("/2/broken"))
      .respond_with(ResponseTemplate::new(503))
      .mount(&mock_server)
      .await;

    let response = client.signed(Method::GET, "/2/unauthorized")?.send().await?;
    let err = read_response::<serde_json::Value>(response).await.unwrap_err();
    assert!(matches!(err, XError::Unauthorized { .. }));

    let response = client.signed(Method::GET, "/2/limited")?.send().await?;
    let err = read_response::<serde_json::Value>(response).await.unwrap_err();
    assert!(matches!(
      err,
      XError::RateLimited {
        reset_at: Some(1_700_000_000)
      }
    ));

    let response = client.signed(Method::GET, "/2/broken")?.send().await?;
    let err = read_response::<serde_json::Value>(response).await.unwrap_err();
    assert_eq!(err.to_string(), "X API error 503: Service Unavailable");
    Ok(())
  }
}
