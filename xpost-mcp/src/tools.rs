//! Parameter types for the MCP tools.

pub mod tweets;
