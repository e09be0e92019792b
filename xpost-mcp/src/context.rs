//! Shared server context available to all tool handlers.

use std::time::Duration;

use tracing::{error, info};
use xpost_api::{XClient, XCredentials};

/// Shared context available to all tool handlers.
///
/// The client is resolved once at startup. When it is absent every tool
/// answers with a "not initialized" message instead of failing the session.
pub struct ServerContext {
  /// Posting client, if startup produced one
  pub client: Option<XClient>,
  /// Pause before each reply of a thread
  pub thread_delay: Duration,
}

impl ServerContext {
  pub const fn new(client: Option<XClient>, thread_delay: Duration) -> Self {
    Self { client, thread_delay }
  }
}

/// Turn loaded credentials into a ready client, or `None` with the reason logged.
///
/// With `verify` set the credentials are checked against `GET /2/users/me`
/// and a failed check also yields `None`.
pub async fn acquire_client(
  credentials: anyhow::Result<XCredentials>,
  api_base_url: Option<&str>,
  verify: bool,
) -> Option<XClient> {
  let credentials = match credentials {
    Ok(credentials) => credentials,
    Err(e) => {
      error!("{e:#}");
      return None;
    }
  };

  let mut client = match XClient::new(credentials) {
    Ok(client) => client,
    Err(e) => {
      error!("Error initializing X API client: {e}");
      return None;
    }
  };
  if let Some(base_url) = api_base_url {
    client = client.with_base_url(base_url);
  }

  if verify {
    match client.get_me().await {
      Ok(user) => info!("Authenticated to the X API as @{}", user.username),
      Err(e) => {
        error!("X API credential check failed: {e}");
        return None;
      }
    }
  } else {
    info!("X API client initialized");
  }

  Some(client)
}
