//! Credential discovery for the X client.
//!
//! Credentials come from four environment variables. The lookup is
//! parameterized so callers (and tests) can supply their own source.

use anyhow::{Result, anyhow};

use crate::models::XCredentials;

/// Environment variable holding the OAuth consumer key.
pub const ENV_API_KEY: &str = "TWITTER_API_KEY";
/// Environment variable holding the OAuth consumer secret.
pub const ENV_API_KEY_SECRET: &str = "TWITTER_API_KEY_SECRET";
/// Environment variable holding the user access token.
pub const ENV_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
/// Environment variable holding the user access token secret.
pub const ENV_ACCESS_TOKEN_SECRET: &str = "TWITTER_ACCESS_TOKEN_SECRET";

/// All credential variables, in the order they are reported.
pub const CREDENTIAL_VARS: [&str; 4] = [ENV_API_KEY, ENV_API_KEY_SECRET, ENV_ACCESS_TOKEN, ENV_ACCESS_TOKEN_SECRET];

/// Load credentials through `lookup`, treating unset and empty values alike.
///
/// # Errors
///
/// Returns an error naming every missing variable.
pub fn load_credentials<F>(lookup: F) -> Result<XCredentials>
where
  F: Fn(&str) -> Option<String>,
{
  let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

  let values: Vec<Option<String>> = CREDENTIAL_VARS.iter().map(|name| read(*name)).collect();
  let missing: Vec<&str> = CREDENTIAL_VARS
    .iter()
    .zip(&values)
    .filter(|(_, value)| value.is_none())
    .map(|(name, _)| *name)
    .collect();

  if !missing.is_empty() {
    return Err(anyhow!(
      "X API credentials not found in environment variables (missing: {}). \
       Please set {ENV_API_KEY}, {ENV_API_KEY_SECRET}, {ENV_ACCESS_TOKEN}, and {ENV_ACCESS_TOKEN_SECRET}.",
      missing.join(", ")
    ));
  }

  let mut values = values.into_iter().flatten();
  let mut next = || values.next().unwrap_or_default();
  Ok(XCredentials {
    api_key: next(),
    api_key_secret: next(),
    access_token: next(),
    access_token_secret: next(),
  })
}

/// Load credentials from the process environment.
pub fn get_x_credentials() -> Result<XCredentials> {
  load_credentials(|name| std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use xpost_test_utils::EnvVarGuard;

  use super::*;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| map.get(name).cloned()
  }

  #[test]
  fn test_load_credentials() {
    let lookup = lookup_from(&[
      (ENV_API_KEY, "key"),
      (ENV_API_KEY_SECRET, "key-secret"),
      (ENV_ACCESS_TOKEN, "token"),
      (ENV_ACCESS_TOKEN_SECRET, "token-secret"),
    ]);

    let creds = load_credentials(lookup).unwrap();
    assert_eq!(creds.api_key, "key");
    assert_eq!(creds.api_key_secret, "key-secret");
    assert_eq!(creds.access_token, "token");
    assert_eq!(creds.access_token_secret, "token-secret");
  }

  #[test]
  fn test_load_credentials_reports_missing() {
    let lookup = lookup_from(&[(ENV_API_KEY, "key"), (ENV_ACCESS_TOKEN, "  ")]);

    let error = load_credentials(lookup).unwrap_err().to_string();
    assert!(error.contains("X API credentials not found"));
    assert!(error.contains("missing: TWITTER_API_KEY_SECRET, TWITTER_ACCESS_TOKEN, TWITTER_ACCESS_TOKEN_SECRET"));
  }

  #[test]
  fn test_get_x_credentials_from_environment() {
    let mut guard = EnvVarGuard::new();
    guard.set(ENV_API_KEY, "env-key");
    guard.set(ENV_API_KEY_SECRET, "env-key-secret");
    guard.set(ENV_ACCESS_TOKEN, "env-token");
    guard.set(ENV_ACCESS_TOKEN_SECRET, "env-token-secret");

    let creds = get_x_credentials().unwrap();
    assert_eq!(creds.api_key, "env-key");
    assert_eq!(creds.access_token_secret, "env-token-secret");

    guard.remove(ENV_ACCESS_TOKEN);
    let error = get_x_credentials().unwrap_err().to_string();
    assert!(error.contains("missing: TWITTER_ACCESS_TOKEN"));
  }
}
