//! The create-post capability the posting procedures depend on.

use std::future::Future;

use crate::client::XClient;
use crate::error::XResult;
use crate::models::TweetId;

/// Something that can publish a post, optionally as a reply to an earlier one.
pub trait TweetPoster: Send + Sync {
  fn create_post(&self, text: &str, reply_to: Option<&TweetId>) -> impl Future<Output = XResult<TweetId>> + Send;
}

impl TweetPoster for XClient {
  async fn create_post(&self, text: &str, reply_to: Option<&TweetId>) -> XResult<TweetId> {
    self.create_tweet(text, reply_to).await.map(|tweet| tweet.id)
  }
}
