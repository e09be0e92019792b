use std::fmt;

use serde::{Deserialize, Serialize};

/// OAuth 1.0a user-context credentials for the X API
#[derive(Clone, PartialEq, Eq)]
pub struct XCredentials {
  pub api_key: String,
  pub api_key_secret: String,
  pub access_token: String,
  pub access_token_secret: String,
}

impl fmt::Debug for XCredentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("XCredentials")
      .field("api_key", &self.api_key)
      .field("api_key_secret", &"<redacted>")
      .field("access_token", &self.access_token)
      .field("access_token_secret", &"<redacted>")
      .finish()
  }
}

/// Identifier of a published tweet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TweetId(String);

impl TweetId {
  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for TweetId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<String> for TweetId {
  fn from(id: String) -> Self {
    Self(id)
  }
}

impl From<&str> for TweetId {
  fn from(id: &str) -> Self {
    Self(id.to_string())
  }
}

/// Body of `POST /2/tweets`
#[derive(Debug, Serialize)]
pub struct CreateTweetRequest<'a> {
  pub text: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reply: Option<TweetReply<'a>>,
}

/// Reply settings for a new tweet
#[derive(Debug, Serialize)]
pub struct TweetReply<'a> {
  pub in_reply_to_tweet_id: &'a str,
}

/// The `{"data": ...}` envelope wrapping every v2 success payload
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
  pub data: T,
}

/// A tweet as returned by `POST /2/tweets`
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTweet {
  pub id: TweetId,
  pub text: String,
}

/// An X user account
#[derive(Debug, Clone, Deserialize)]
pub struct XUser {
  pub id: String,
  pub name: String,
  pub username: String,
}

/// Error payload returned by the X API on non-success statuses.
///
/// v2 endpoints answer with problem-details (`title`/`detail`); some legacy
/// paths still answer with an `errors` array.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub detail: Option<String>,
  #[serde(default)]
  pub errors: Vec<ApiErrorItem>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorItem {
  #[serde(default)]
  pub message: Option<String>,
}

impl ApiErrorBody {
  /// Most specific human-readable message in the payload, if any.
  pub fn summary(&self) -> Option<String> {
    self
      .detail
      .clone()
      .or_else(|| self.errors.iter().find_map(|e| e.message.clone()))
      .or_else(|| self.title.clone())
  }
}
