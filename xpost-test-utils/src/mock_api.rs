//! A wiremock stand-in for the X API
//!
//! `MockXApi` serves the two endpoints xpost talks to (`POST /2/tweets` and
//! `GET /2/users/me`) and records what was posted so tests can assert on the
//! exact sequence of remote calls.

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const TWEETS_PATH: &str = "/2/tweets";
const ME_PATH: &str = "/2/users/me";

/// Answers a create-tweet request with a fixed id, echoing the posted text
struct CreatedTweetResponder {
  id: String,
}

impl Respond for CreatedTweetResponder {
  fn respond(&self, request: &Request) -> ResponseTemplate {
    let text = serde_json::from_slice::<Value>(&request.body)
      .ok()
      .and_then(|body| body.get("text").cloned())
      .unwrap_or(Value::Null);

    ResponseTemplate::new(201).set_body_json(json!({
      "data": {
        "id": self.id,
        "text": text,
        "edit_history_tweet_ids": [self.id]
      }
    }))
  }
}

/// Wiremock server pre-programmed with X API responses
pub struct MockXApi {
  server: MockServer,
}

impl MockXApi {
  /// Start a fresh mock server with nothing mounted
  pub async fn start() -> Self {
    Self {
      server: MockServer::start().await,
    }
  }

  /// Base URI to hand to the client under test
  pub fn uri(&self) -> String {
    self.server.uri()
  }

  /// Access the underlying wiremock server for custom mocks
  pub const fn server(&self) -> &MockServer {
    &self.server
  }

  /// Answer the next `ids.len()` create-tweet requests with these ids, in order
  pub async fn mount_created_tweets(&self, ids: &[&str]) {
    for id in ids {
      Mock::given(method("POST"))
        .and(path(TWEETS_PATH))
        .respond_with(CreatedTweetResponder { id: id.to_string() })
        .up_to_n_times(1)
        .mount(&self.server)
        .await;
    }
  }

  /// Answer every remaining create-tweet request with an error
  ///
  /// Mount this after [`MockXApi::mount_created_tweets`] to fail the request
  /// that follows the successful ones.
  pub async fn mount_tweet_failure(&self, status: u16, body: Value) {
    Mock::given(method("POST"))
      .and(path(TWEETS_PATH))
      .respond_with(ResponseTemplate::new(status).set_body_json(body))
      .mount(&self.server)
      .await;
  }

  /// Answer `GET /2/users/me` with the given account
  pub async fn mount_me(&self, username: &str) {
    Mock::given(method("GET"))
      .and(path(ME_PATH))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "data": {
          "id": "2244994945",
          "name": username,
          "username": username
        }
      })))
      .mount(&self.server)
      .await;
  }

  /// Answer `GET /2/users/me` with an error status
  pub async fn mount_me_failure(&self, status: u16) {
    Mock::given(method("GET"))
      .and(path(ME_PATH))
      .respond_with(ResponseTemplate::new(status).set_body_json(json!({
        "title": "Unauthorized",
        "detail": "Unauthorized",
        "status": status
      })))
      .mount(&self.server)
      .await;
  }

  /// JSON bodies of every create-tweet request received, in arrival order
  pub async fn created_tweet_bodies(&self) -> Vec<Value> {
    self
      .server
      .received_requests()
      .await
      .unwrap_or_default()
      .iter()
      .filter(|request| request.method.as_str() == "POST" && request.url.path() == TWEETS_PATH)
      .filter_map(|request| serde_json::from_slice(&request.body).ok())
      .collect()
  }

  /// Texts of every create-tweet request received, in arrival order
  pub async fn created_tweet_texts(&self) -> Vec<String> {
    self
      .created_tweet_bodies()
      .await
      .iter()
      .filter_map(|body| body.get("text").and_then(Value::as_str).map(String::from))
      .collect()
  }
}
