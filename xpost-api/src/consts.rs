//! Constants for the xpost-api client

use std::time::Duration;

/// Base URL for the X API v2
pub const API_BASE_URL: &str = "https://api.twitter.com";

/// User-Agent header value for the X API client
pub const USER_AGENT: &str = concat!("xpost/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout applied by the underlying HTTP client
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum length of a single tweet, in characters
pub const MAX_TWEET_CHARS: usize = 280;

/// Response header carrying the epoch second at which the rate-limit window resets
pub const RATE_LIMIT_RESET_HEADER: &str = "x-rate-limit-reset";
