use reqwest::Method;
use tracing::{debug, instrument};

use crate::client::{XClient, read_response};
use crate::error::XResult;
use crate::models::{DataEnvelope, XUser};

impl XClient {
  /// Get the user the credentials belong to
  #[instrument(skip(self), level = "debug")]
  pub async fn get_me(&self) -> XResult<XUser> {
    let response = self.signed(Method::GET, "/2/users/me")?.send().await?;

    let envelope: DataEnvelope<XUser> = read_response(response).await?;
    debug!("Authenticated as @{}", envelope.data.username);
    Ok(envelope.data)
  }
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{header_exists, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::XClient;
  use crate::error::XError;
  use crate::models::XCredentials;

  fn client_for(uri: &str) -> XClient {
    let credentials = XCredentials {
      api_key: "test_key".to_string(),
      api_key_secret: "test_key_secret".to_string(),
      access_token: "test_token".to_string(),
      access_token_secret: "test_token_secret".to_string(),
    };
    XClient::new(credentials).unwrap().with_base_url(uri)
  }

  #[tokio::test]
  async fn test_get_me() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/2/users/me"))
      .and(header_exists("authorization"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "data": {
          "id": "2244994945",
          "name": "Test User",
          "username": "testuser"
        }
      })))
      .mount(&mock_server)
      .await;

    let user = client_for(&mock_server.uri()).get_me().await?;
    assert_eq!(user.id, "2244994945");
    assert_eq!(user.username, "testuser");
    Ok(())
  }

  #[tokio::test]
  async fn test_get_me_unauthorized() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/2/users/me"))
      .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
        "errors": [{ "message": "Invalid or expired token", "code": 89 }]
      })))
      .mount(&mock_server)
      .await;

    let err = client_for(&mock_server.uri()).get_me().await.unwrap_err();
    assert!(matches!(err, XError::Unauthorized { .. }));
    assert_eq!(err.to_string(), "Unauthorized: Invalid or expired token");
    Ok(())
  }
}
