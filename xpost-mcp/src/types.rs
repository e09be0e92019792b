//! Rendering of posting outcomes as MCP tool results.
//!
//! Every tool answers with one human-readable text block. Rejections and API
//! failures are still successful MCP calls; they only set `is_error`.

use std::fmt::Display;

use rmcp::model::{CallToolResult, Content};

use crate::posting::{ThreadOutcome, TweetOutcome};

/// Wrap a message in a `CallToolResult`, flagging it as an error if needed.
pub fn text_result(message: impl Display, is_error: bool) -> CallToolResult {
  let mut result = CallToolResult::success(vec![Content::text(message.to_string())]);
  result.is_error = Some(is_error);
  result
}

impl From<TweetOutcome> for CallToolResult {
  fn from(outcome: TweetOutcome) -> Self {
    text_result(&outcome, outcome.is_error())
  }
}

impl From<ThreadOutcome> for CallToolResult {
  fn from(outcome: ThreadOutcome) -> Self {
    text_result(&outcome, outcome.is_error())
  }
}
