use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PostTweetParams {
  /// The content of the tweet (1 to 280 characters)
  pub text: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PostThreadParams {
  /// Tweets in thread order. The first is posted on its own and each one
  /// after it replies to the tweet before it.
  pub tweets: Vec<String>,
}
