//! DeepSource MCP server binary.
//!
//! Serves the MCP tool surface over stdio (default) or Streamable HTTP.
//! Logging goes to stderr so the stdio transport keeps stdout for
//! JSON-RPC frames.

use std::net::IpAddr;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use deepsource_mcp::client::DeepSourceClient;
use deepsource_mcp::client::error::ClientError;
use deepsource_mcp::mcp::{self, DeepSourceMcpServer, HttpConfig, ServeError};
use miette::Diagnostic;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Client error: {0}")]
    #[diagnostic(code(deepsource::binary::client))]
    Client(#[from] ClientError),

    #[error("Serve error: {0}")]
    #[diagnostic(code(deepsource::binary::serve))]
    Serve(#[from] ServeError),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    /// JSON-RPC over stdin/stdout
    Stdio,
    /// Streamable HTTP under /mcp
    Http,
}

#[derive(Parser)]
#[command(name = "deepsource-mcp")]
#[command(author, version, about = "DeepSource MCP server", long_about = None)]
struct Cli {
    /// Transport to serve on
    #[arg(long, value_enum, default_value = "stdio")]
    transport: Transport,

    /// Host address to bind to (HTTP transport only)
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on (HTTP transport only)
    #[arg(short, long, default_value = "7777")]
    port: u16,

    /// DeepSource API key (defaults to DEEPSOURCE_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// DeepSource GraphQL endpoint (defaults to DEEPSOURCE_API_URL or the hosted endpoint)
    #[arg(long)]
    api_url: Option<String>,
}

/// Initialize tracing subscriber with env filter, writing to stderr.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deepsource_mcp=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();

    init_tracing();

    let client = Arc::new(DeepSourceClient::new(cli.api_key, cli.api_url)?);

    match cli.transport {
        Transport::Stdio => {
            mcp::serve_stdio(DeepSourceMcpServer::<DeepSourceClient>::new(client)).await?;
        }
        Transport::Http => {
            mcp::serve_http(
                HttpConfig {
                    host: cli.host,
                    port: cli.port,
                },
                client,
            )
            .await?;
        }
    }

    Ok(())
}
