//! xpost-mcp: MCP server for posting tweets and threads to X (Twitter).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use xpost_mcp::config::load_env_file;
use xpost_mcp::transport::{serve_http, serve_stdio};
use xpost_mcp::{ServerConfig, ServerContext, Transport, XPostMcpServer, acquire_client};

#[derive(Parser)]
#[command(version, about = "MCP server for posting tweets and threads to X (Twitter)")]
struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  verbose: u8,

  /// Transport to serve on: `sse`/`http` (streamable HTTP at /mcp) or `stdio` [env: TRANSPORT]
  #[arg(long, value_name = "MODE")]
  transport: Option<Transport>,

  /// Address to bind the HTTP transport to [env: HOST]
  #[arg(long, value_name = "HOST")]
  host: Option<String>,

  /// Port to bind the HTTP transport to [env: PORT]
  #[arg(long, value_name = "PORT")]
  port: Option<u16>,

  /// Pause between tweets of a thread, in milliseconds [env: THREAD_DELAY_MS]
  #[arg(long = "thread-delay-ms", value_name = "MS")]
  thread_delay_ms: Option<u64>,

  /// Check the credentials against the X API before serving [env: VERIFY_CREDENTIALS]
  #[arg(long = "verify-credentials")]
  verify_credentials: bool,

  /// Load environment variables from this file instead of searching for `.env`
  #[arg(long = "env-file", value_name = "PATH")]
  env_file: Option<PathBuf>,
}

impl Cli {
  /// Layer command-line flags over the environment configuration.
  fn apply(self, config: &mut ServerConfig) {
    if let Some(transport) = self.transport {
      config.transport = transport;
    }
    if let Some(host) = self.host {
      config.host = host;
    }
    if let Some(port) = self.port {
      config.port = port;
    }
    if let Some(ms) = self.thread_delay_ms {
      config.thread_delay = Duration::from_millis(ms);
    }
    config.verify_credentials |= self.verify_credentials;
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  // Loaded first so RUST_LOG from the file applies to the subscriber.
  let env_file = load_env_file(cli.env_file.as_deref())?;

  // Tracing to stderr; stdout carries the MCP protocol on the stdio transport.
  let level = match cli.verbose {
    0 => tracing::Level::WARN,
    1 => tracing::Level::INFO,
    2 => tracing::Level::DEBUG,
    _ => tracing::Level::TRACE,
  };

  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  if let Some(path) = env_file {
    debug!("Loaded environment from {}", path.display());
  }

  let mut config = ServerConfig::from_env().context("Invalid server configuration")?;
  cli.apply(&mut config);
  info!("Starting xpost-mcp with {} transport", config.transport);

  let client = acquire_client(
    xpost_api::get_x_credentials(),
    config.api_base_url.as_deref(),
    config.verify_credentials,
  )
  .await;

  let server = XPostMcpServer::new(ServerContext::new(client, config.thread_delay));

  match config.transport {
    Transport::Stdio => serve_stdio(server).await,
    Transport::Http => serve_http(server, &config.host, config.port).await,
  }
}
