//! # xpost MCP Server
//!
//! Model Context Protocol server that publishes tweets and threads to X
//! (Twitter) on behalf of a single account. It exposes two tools,
//! `post_tweet` and `post_thread`, over either stdio or streamable HTTP.

pub mod config;
pub mod context;
pub mod posting;
pub mod server;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::{ServerConfig, Transport};
pub use context::{ServerContext, acquire_client};
pub use server::XPostMcpServer;
