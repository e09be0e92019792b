//! Single-tweet and thread posting procedures.
//!
//! Both procedures validate before touching the network and report every
//! result as an outcome value; nothing here propagates an error. A thread is
//! published strictly in order because each reply needs the id of the tweet
//! before it, and a failure part-way leaves the already-published prefix in
//! place. The outcome always lists that prefix so the caller can resume by
//! hand.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};
use xpost_api::consts::MAX_TWEET_CHARS;
use xpost_api::{TweetId, TweetPoster, XError};

/// Pause between successive tweets of a thread
pub const DEFAULT_THREAD_DELAY: Duration = Duration::from_secs(1);

const NOT_CONFIGURED: &str = "Error: Twitter client not initialized. Check credentials.";

/// Why a piece of content cannot be posted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContentError {
  #[error("exceeds {} characters", MAX_TWEET_CHARS)]
  TooLong { chars: usize },
  #[error("cannot be empty")]
  Empty,
}

/// Check that `text` is between 1 and 280 characters.
pub fn validate_content(text: &str) -> Result<(), ContentError> {
  let chars = text.chars().count();
  if chars > MAX_TWEET_CHARS {
    return Err(ContentError::TooLong { chars });
  }
  if chars == 0 {
    return Err(ContentError::Empty);
  }
  Ok(())
}

/// Result of posting a single tweet
#[derive(Debug)]
pub enum TweetOutcome {
  /// No posting client is available
  NotConfigured,
  /// The text was rejected before any remote call
  Invalid(ContentError),
  /// The tweet was published
  Posted(TweetId),
  /// The remote call failed
  Failed(XError),
}

impl TweetOutcome {
  pub const fn is_error(&self) -> bool {
    !matches!(self, Self::Posted(_))
  }
}

impl fmt::Display for TweetOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::NotConfigured => f.write_str(NOT_CONFIGURED),
      Self::Invalid(error) => write!(f, "Error: Tweet text {error}."),
      Self::Posted(id) => write!(f, "Tweet posted successfully! ID: {id}"),
      Self::Failed(error) => write!(f, "Error posting tweet: {error}"),
    }
  }
}

/// Result of posting a thread
#[derive(Debug)]
pub enum ThreadOutcome {
  /// The thread had no tweets
  NoTweets,
  /// No posting client is available
  NotConfigured,
  /// The head tweet was rejected; nothing was published
  InvalidFirst(ContentError),
  /// A reply was rejected before its remote call; `posted` were published
  InvalidReply {
    /// 1-based position of the rejected tweet
    number: usize,
    error: ContentError,
    posted: Vec<TweetId>,
  },
  /// A remote call failed; `posted` were published before it
  Failed { posted: Vec<TweetId>, error: XError },
  /// Every tweet was published
  Posted(Vec<TweetId>),
}

impl ThreadOutcome {
  pub const fn is_error(&self) -> bool {
    !matches!(self, Self::Posted(_))
  }

  /// Ids of the tweets that were published, in thread order
  pub fn posted(&self) -> &[TweetId] {
    match self {
      Self::InvalidReply { posted, .. } | Self::Failed { posted, .. } | Self::Posted(posted) => posted.as_slice(),
      Self::NoTweets | Self::NotConfigured | Self::InvalidFirst(_) => &[],
    }
  }
}

impl fmt::Display for ThreadOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::NoTweets => f.write_str("Error: No tweets provided for the thread."),
      Self::NotConfigured => f.write_str(NOT_CONFIGURED),
      Self::InvalidFirst(error) => write!(f, "Error: First tweet {error}."),
      Self::InvalidReply { number, error, posted } => {
        write!(f, "Error: Tweet {number} {error}.")?;
        if let Some(last) = posted.last() {
          write!(f, " Thread partially posted up to tweet ID {last}.")?;
        }
        Ok(())
      }
      Self::Failed { posted, error } if posted.is_empty() => write!(f, "Error posting thread: {error}"),
      Self::Failed { posted, error } => {
        write!(f, "Error posting thread (partially posted: {}): {error}", join_ids(posted))
      }
      Self::Posted(posted) => write!(f, "Thread posted successfully! Tweet IDs: {}", join_ids(posted)),
    }
  }
}

fn join_ids(ids: &[TweetId]) -> String {
  ids.iter().map(TweetId::as_str).collect::<Vec<_>>().join(", ")
}

/// Post a single tweet.
///
/// Checks run in order: client present, not too long, not empty. At most one
/// remote call is made and it is never retried.
pub async fn post_tweet<P: TweetPoster>(poster: Option<&P>, text: &str) -> TweetOutcome {
  let Some(poster) = poster else {
    warn!("post_tweet called without a configured X client");
    return TweetOutcome::NotConfigured;
  };

  if let Err(error) = validate_content(text) {
    debug!("Rejected tweet: {error:?}");
    return TweetOutcome::Invalid(error);
  }

  match poster.create_post(text, None).await {
    Ok(id) => {
      info!("Posted tweet {id}");
      TweetOutcome::Posted(id)
    }
    Err(error) => {
      warn!("Failed to post tweet: {error}");
      TweetOutcome::Failed(error)
    }
  }
}

/// Post `tweets` as a thread, each reply linked to the tweet before it.
///
/// Nothing is sent unless the list is non-empty, a client is present and the
/// head tweet is valid. Replies are validated one at a time just before they
/// are sent, with `delay` slept before each reply. The first rejected or
/// failed tweet stops the thread; published tweets are never rolled back.
pub async fn post_thread<P, S>(poster: Option<&P>, tweets: &[S], delay: Duration) -> ThreadOutcome
where
  P: TweetPoster,
  S: AsRef<str>,
{
  let Some((head, replies)) = tweets.split_first() else {
    return ThreadOutcome::NoTweets;
  };

  let Some(poster) = poster else {
    warn!("post_thread called without a configured X client");
    return ThreadOutcome::NotConfigured;
  };

  if let Err(error) = validate_content(head.as_ref()) {
    debug!("Rejected head tweet: {error:?}");
    return ThreadOutcome::InvalidFirst(error);
  }

  let mut posted = Vec::with_capacity(tweets.len());

  let mut last_id = match poster.create_post(head.as_ref(), None).await {
    Ok(id) => id,
    Err(error) => {
      warn!("Failed to post head tweet: {error}");
      return ThreadOutcome::Failed { posted, error };
    }
  };
  info!("Posted thread head {last_id}");
  posted.push(last_id.clone());

  for (offset, text) in replies.iter().enumerate() {
    let number = offset + 2;

    if let Err(error) = validate_content(text.as_ref()) {
      warn!("Stopping thread at tweet {number}: {error:?}");
      return ThreadOutcome::InvalidReply { number, error, posted };
    }

    if !delay.is_zero() {
      tokio::time::sleep(delay).await;
    }

    match poster.create_post(text.as_ref(), Some(&last_id)).await {
      Ok(id) => {
        info!("Posted tweet {number} of {} as {id} (reply to {last_id})", tweets.len());
        posted.push(id.clone());
        last_id = id;
      }
      Err(error) => {
        warn!("Stopping thread at tweet {number}: {error}");
        return ThreadOutcome::Failed { posted, error };
      }
    }
  }

  ThreadOutcome::Posted(posted)
}
