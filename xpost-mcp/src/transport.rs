//! Serving the MCP server over stdio or streamable HTTP.

use std::future::Future;

use anyhow::{Context, Result};
use rmcp::ServiceExt;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::server::XPostMcpServer;

/// Path the HTTP transport is mounted at
pub const MCP_HTTP_PATH: &str = "/mcp";

/// Serve a single session over stdin/stdout until the client disconnects.
pub async fn serve_stdio(server: XPostMcpServer) -> Result<()> {
  info!("Serving MCP over stdio");
  let service = server.serve(rmcp::transport::io::stdio()).await?;
  service.waiting().await?;
  Ok(())
}

/// Build the axum router exposing `server` at [`MCP_HTTP_PATH`].
///
/// Each MCP session gets its own clone of the server; they all share one
/// context and therefore one X client. Cancelling `cancel` closes every open
/// session stream.
pub fn http_router(server: XPostMcpServer, cancel: CancellationToken) -> axum::Router {
  let config = StreamableHttpServerConfig {
    cancellation_token: cancel,
    ..Default::default()
  };
  let service = StreamableHttpService::new(
    move || Ok(server.clone()),
    LocalSessionManager::default().into(),
    config,
  );
  axum::Router::new().nest_service(MCP_HTTP_PATH, service)
}

/// Serve over streamable HTTP on `host:port` until Ctrl-C.
pub async fn serve_http(server: XPostMcpServer, host: &str, port: u16) -> Result<()> {
  let listener = TcpListener::bind((host, port))
    .await
    .with_context(|| format!("Failed to bind {host}:{port}"))?;
  serve_http_on(server, listener, ctrl_c()).await
}

/// Serve over streamable HTTP on an already bound listener until `shutdown` resolves.
///
/// Session streams are cancelled when `shutdown` fires so in-flight SSE
/// connections do not hold the graceful shutdown open.
pub async fn serve_http_on<F>(server: XPostMcpServer, listener: TcpListener, shutdown: F) -> Result<()>
where
  F: Future<Output = ()> + Send + 'static,
{
  let address = listener.local_addr()?;
  info!("Serving MCP over HTTP at http://{address}{MCP_HTTP_PATH}");

  let cancel = CancellationToken::new();
  let router = http_router(server, cancel.child_token());

  axum::serve(listener, router)
    .with_graceful_shutdown(async move {
      shutdown.await;
      info!("Shutting down");
      cancel.cancel();
    })
    .await
    .context("HTTP server error")?;

  Ok(())
}

async fn ctrl_c() {
  until_signal(tokio::signal::ctrl_c()).await;
}

/// Resolve when `signal` fires. A signal that cannot be installed never resolves.
async fn until_signal<F>(signal: F)
where
  F: Future<Output = std::io::Result<()>>,
{
  if let Err(e) = signal.await {
    // Without a handler the server runs until killed.
    warn!("Failed to listen for Ctrl-C: {e}");
    std::future::pending::<()>().await;
  }
}

#[cfg(test)]
mod tests {
  use std::io;
  use std::time::Duration;

  use super::*;

  #[tokio::test]
  async fn test_signal_ends_wait() {
    until_signal(async { Ok(()) }).await;
  }

  #[tokio::test(start_paused = true)]
  async fn test_failed_signal_handler_keeps_serving() {
    let failed = async { Err(io::Error::other("signal handler unavailable")) };

    let waited = tokio::time::timeout(Duration::from_secs(3600), until_signal(failed)).await;

    assert!(waited.is_err());
  }
}
