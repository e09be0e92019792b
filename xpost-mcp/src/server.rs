//! MCP server implementation with the posting tool handlers.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use tracing::debug;

use crate::context::ServerContext;
use crate::posting;
use crate::tools::tweets::{PostThreadParams, PostTweetParams};

#[derive(Clone)]
pub struct XPostMcpServer {
  context: Arc<ServerContext>,
  tool_router: ToolRouter<Self>,
}

#[tool_router]
impl XPostMcpServer {
  pub fn new(context: ServerContext) -> Self {
    let context = Arc::new(context);
    Self {
      context,
      tool_router: Self::tool_router(),
    }
  }

  #[tool(
    description = "Posts a single tweet to X (Twitter). The text must be between 1 and 280 characters.",
    annotations(destructive_hint = false, idempotent_hint = false, open_world_hint = true)
  )]
  pub async fn post_tweet(&self, params: Parameters<PostTweetParams>) -> Result<CallToolResult, McpError> {
    debug!("post_tweet called ({} chars)", params.0.text.chars().count());
    let outcome = posting::post_tweet(self.context.client.as_ref(), &params.0.text).await;
    Ok(outcome.into())
  }

  #[tool(
    description = "Posts a thread to X (Twitter). Each tweet must be between 1 and 280 characters; \
                   every tweet after the first replies to the one before it. Posting stops at the \
                   first tweet that is rejected or fails, and the message lists what was published.",
    annotations(destructive_hint = false, idempotent_hint = false, open_world_hint = true)
  )]
  pub async fn post_thread(&self, params: Parameters<PostThreadParams>) -> Result<CallToolResult, McpError> {
    debug!("post_thread called with {} tweets", params.0.tweets.len());
    let outcome = posting::post_thread(self.context.client.as_ref(), &params.0.tweets, self.context.thread_delay).await;
    Ok(outcome.into())
  }
}

#[tool_handler]
impl ServerHandler for XPostMcpServer {
  fn get_info(&self) -> ServerInfo {
    ServerInfo {
      instructions: Some(
        "MCP server for posting tweets and threads to X (Twitter). Use post_tweet for a single \
         tweet and post_thread for an ordered list of tweets published as a reply chain."
          .into(),
      ),
      capabilities: ServerCapabilities::builder().enable_tools().build(),
      ..Default::default()
    }
  }
}
