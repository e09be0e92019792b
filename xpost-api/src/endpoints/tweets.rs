//! X tweet publishing endpoint.

use reqwest::Method;
use tracing::{info, instrument, trace};

use crate::client::{XClient, read_response};
use crate::error::XResult;
use crate::models::{CreateTweetRequest, CreatedTweet, DataEnvelope, TweetId, TweetReply};

impl XClient {
  /// Publish a tweet, optionally as a reply to an existing tweet.
  ///
  /// # Errors
  ///
  /// Returns an error if the request cannot be sent, the API rejects it, or
  /// the response does not contain the created tweet.
  #[instrument(skip(self, text), fields(chars = text.chars().count()), level = "debug")]
  pub async fn create_tweet(&self, text: &str, in_reply_to: Option<&TweetId>) -> XResult<CreatedTweet> {
    let body = CreateTweetRequest {
      text,
      reply: in_reply_to.map(|id| TweetReply {
        in_reply_to_tweet_id: id.as_str(),
      }),
    };
    trace!("Create tweet request: {:?}", body);

    let response = self.signed(Method::POST, "/2/tweets")?.json(&body).send().await?;

    let envelope: DataEnvelope<CreatedTweet> = read_response(response).await?;
    info!("Created tweet {}", envelope.data.id);
    Ok(envelope.data)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use wiremock::matchers::{body_json, header_exists, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};
  use xpost_test_utils::MockXApi;

  use crate::client::XClient;
  use crate::error::XError;
  use crate::models::{TweetId, XCredentials};

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
  async fn test_create_tweet_success() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/2/tweets"))
      .and(header_exists("authorization"))
      .and(body_json(json!({ "text": "Hello, X!" })))
      .respond_with(ResponseTemplate::new(201).set_body_json(json!({
        "data": {
          "id": "1445880548472328192",
          "text": "Hello, X!",
          "edit_history_tweet_ids": ["1445880548472328192"]
        }
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let client = client_for(&mock_server.uri());
    let tweet = client.create_tweet("Hello, X!", None).await?;

    assert_eq!(tweet.id, TweetId::from("1445880548472328192"));
    assert_eq!(tweet.text, "Hello, X!");
    Ok(())
  }

  #[tokio::test]
  async fn test_create_reply_links_parent() -> anyhow::Result<()> {
    let api = MockXApi::start().await;
    api.mount_created_tweets(&["200"]).await;

    let client = client_for(&api.uri());
    let parent = TweetId::from("100");
    let tweet = client.create_tweet("a reply", Some(&parent)).await?;
    assert_eq!(tweet.id.as_str(), "200");

    let sent = api.created_tweet_bodies().await;
    assert_eq!(
      sent,
      vec![json!({ "text": "a reply", "reply": { "in_reply_to_tweet_id": "100" } })]
    );
    Ok(())
  }

  #[tokio::test]
  async fn test_create_tweet_duplicate_content() -> anyhow::Result<()> {
    let api = MockXApi::start().await;
    api
      .mount_tweet_failure(
        403,
        json!({
          "title": "Forbidden",
          "detail": "You are not allowed to create a Tweet with duplicate content.",
          "type": "about:blank",
          "status": 403
        }),
      )
      .await;

    let client = client_for(&api.uri());
    let err = client.create_tweet("again", None).await.unwrap_err();

    assert!(matches!(err, XError::Forbidden { .. }));
    assert_eq!(
      err.to_string(),
      "Forbidden: You are not allowed to create a Tweet with duplicate content."
    );
    Ok(())
  }

  #[tokio::test]
  async fn test_create_tweet_missing_data() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/2/tweets"))
      .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "errors": [] })))
      .mount(&mock_server)
      .await;

    let client = client_for(&mock_server.uri());
    let err = client.create_tweet("hello", None).await.unwrap_err();

    assert!(matches!(err, XError::InvalidResponse(_)));
    Ok(())
  }
}
