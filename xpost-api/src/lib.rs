//! # X API Client
//!
//! Provides X (Twitter) API v2 integration for publishing tweets and replies,
//! authenticating every request with OAuth 1.0a user-context signatures.

pub mod auth;
pub mod client;
pub mod consts;
pub mod endpoints;
pub mod error;
pub mod models;
mod oauth;
pub mod poster;

// Re-export credential helpers
pub use auth::{get_x_credentials, load_credentials};
// Re-export the client
pub use client::XClient;
pub use error::{XError, XResult};
// Re-export models
pub use models::{CreatedTweet, TweetId, XCredentials, XUser};
pub use poster::TweetPoster;
