//! Server configuration from environment variables and `.env` files.
//!
//! Every setting has a default, so an empty environment yields a usable
//! configuration. Command-line flags are layered on top in `main`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use thiserror::Error;

use crate::posting::DEFAULT_THREAD_DELAY;

pub const ENV_TRANSPORT: &str = "TRANSPORT";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_THREAD_DELAY_MS: &str = "THREAD_DELAY_MS";
pub const ENV_VERIFY_CREDENTIALS: &str = "VERIFY_CREDENTIALS";
pub const ENV_API_BASE_URL: &str = "TWITTER_API_BASE_URL";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8054;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("unknown transport '{0}' (expected 'sse', 'http' or 'stdio')")]
  UnknownTransport(String),
  #[error("invalid value for {name}: '{value}'")]
  InvalidValue { name: &'static str, value: String },
}

/// How the MCP server is exposed to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
  /// Streamable HTTP at `/mcp`; also selected by the legacy name `sse`
  #[default]
  Http,
  /// JSON-RPC over stdin/stdout
  Stdio,
}

impl FromStr for Transport {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "sse" | "http" | "streamable-http" => Ok(Self::Http),
      "stdio" => Ok(Self::Stdio),
      _ => Err(ConfigError::UnknownTransport(s.to_string())),
    }
  }
}

impl fmt::Display for Transport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Http => f.write_str("http"),
      Self::Stdio => f.write_str("stdio"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub transport: Transport,
  pub host: String,
  pub port: u16,
  /// Pause before each reply of a thread
  pub thread_delay: Duration,
  /// Call `GET /2/users/me` at startup and refuse to post if it fails
  pub verify_credentials: bool,
  /// Alternate X API origin, mainly for proxies and tests
  pub api_base_url: Option<String>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      transport: Transport::default(),
      host: DEFAULT_HOST.to_string(),
      port: DEFAULT_PORT,
      thread_delay: DEFAULT_THREAD_DELAY,
      verify_credentials: false,
      api_base_url: None,
    }
  }
}

impl ServerConfig {
  /// Build a configuration from the process environment.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  /// Build a configuration from an arbitrary variable lookup.
  ///
  /// Unset and blank variables fall back to their defaults.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let read = |name: &str| lookup(name).map(|value| value.trim().to_string()).filter(|v| !v.is_empty());
    let mut config = Self::default();

    if let Some(value) = read(ENV_TRANSPORT) {
      config.transport = value.parse()?;
    }
    if let Some(value) = read(ENV_HOST) {
      config.host = value;
    }
    if let Some(value) = read(ENV_PORT) {
      config.port = parse_number(ENV_PORT, value)?;
    }
    if let Some(value) = read(ENV_THREAD_DELAY_MS) {
      config.thread_delay = Duration::from_millis(parse_number(ENV_THREAD_DELAY_MS, value)?);
    }
    if let Some(value) = read(ENV_VERIFY_CREDENTIALS) {
      config.verify_credentials = parse_bool(ENV_VERIFY_CREDENTIALS, value)?;
    }
    config.api_base_url = read(ENV_API_BASE_URL);

    Ok(config)
  }
}

fn parse_number<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
  value.parse().ok().ok_or(ConfigError::InvalidValue { name, value })
}

fn parse_bool(name: &'static str, value: String) -> Result<bool, ConfigError> {
  match value.to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Ok(true),
    "0" | "false" | "no" | "off" => Ok(false),
    _ => Err(ConfigError::InvalidValue { name, value }),
  }
}

/// Load a `.env` file into the process environment.
///
/// Variables that are already set win over the file. With no explicit path a
/// `.env` in the current directory or its parents is used if present; an
/// explicit path must exist. Returns the path that was loaded, if any.
pub fn load_env_file(path: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
  match path {
    Some(path) => {
      dotenvy::from_path(path).with_context(|| format!("Failed to load environment file {}", path.display()))?;
      Ok(Some(path.to_path_buf()))
    }
    None => match dotenvy::dotenv() {
      Ok(path) => Ok(Some(path)),
      Err(e) if e.not_found() => Ok(None),
      Err(e) => Err(e).context("Failed to load .env file"),
    },
  }
}
