//! # X API Endpoints
//!
//! Endpoint implementations grouped by resource type: tweet publishing and
//! the authenticated-user lookup used to verify credentials.

pub mod tweets;
pub mod users;
