//! Test utilities shared across the xpost workspace
//!
//! This crate provides common testing infrastructure including:
//! - Environment variable isolation ([`EnvVarGuard`])
//! - Temporary `.env` files ([`EnvFileGuard`])
//! - A wiremock-backed stand-in for the X API ([`MockXApi`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod mock_api;

// Re-export commonly used items
pub use env::{EnvFileGuard, EnvVarGuard};
pub use mock_api::MockXApi;
