//! MCP transport wiring.
//!
//! The server can run over stdio (the default for MCP clients spawning a
//! subprocess) or as a Streamable HTTP service nested into an Axum
//! router.

use std::net::IpAddr;
use std::sync::Arc;

use miette::Diagnostic;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::client::api::DeepSource;

use super::server::DeepSourceMcpServer;

#[derive(Error, Diagnostic, Debug)]
pub enum ServeError {
    #[error("MCP server failed to start: {message}")]
    #[diagnostic(code(deepsource::mcp::startup))]
    Startup { message: String },

    #[error("MCP transport error: {message}")]
    #[diagnostic(code(deepsource::mcp::transport))]
    Transport { message: String },

    #[error("Failed to bind {addr}")]
    #[diagnostic(
        code(deepsource::mcp::bind),
        help("Is another process already listening on this port?")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

/// HTTP transport configuration.
pub struct HttpConfig {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".parse().unwrap(),
            port: 7777,
        }
    }
}

/// Create an MCP Streamable HTTP service that can be nested into an Axum
/// router.
///
/// A fresh server instance is created per session; all sessions share the
/// same DeepSource client.
pub fn create_mcp_service<D: DeepSource + 'static>(
    deepsource: impl Into<Arc<D>>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<DeepSourceMcpServer<D>, LocalSessionManager> {
    let deepsource = deepsource.into();

    // Service factory: creates a new server instance per session.
    // Note: returns io::Error to match rmcp's expected signature.
    let service_factory = move || -> Result<DeepSourceMcpServer<D>, std::io::Error> {
        Ok(DeepSourceMcpServer::new(Arc::clone(&deepsource)))
    };

    // `StreamableHttpServerConfig` is `#[non_exhaustive]`, so it cannot be
    // built with a struct literal from outside its crate; set the fields the
    // original literal specified on top of the default.
    let mut config = StreamableHttpServerConfig::default();
    config.sse_keep_alive = None; // Use default (15s)
    config.sse_retry = None; // Use default retry behavior
    config.stateful_mode = true; // Enable session management
    config.cancellation_token = cancellation_token;

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}

/// Serve MCP over stdio, blocking until the client disconnects.
pub async fn serve_stdio<D: DeepSource + 'static>(
    server: DeepSourceMcpServer<D>,
) -> Result<(), ServeError> {
    let service = server.serve(stdio()).await.map_err(|e| ServeError::Startup {
        message: e.to_string(),
    })?;

    service.waiting().await.map_err(|e| ServeError::Transport {
        message: e.to_string(),
    })?;

    Ok(())
}

/// Serve MCP over Streamable HTTP at `/mcp`.
pub async fn serve_http<D: DeepSource + 'static>(
    config: HttpConfig,
    deepsource: Arc<D>,
) -> Result<(), ServeError> {
    let cancellation_token = CancellationToken::new();
    let mcp_service = create_mcp_service::<D>(deepsource, cancellation_token.clone());

    let app = axum::Router::new()
        .nest_service("/mcp", mcp_service)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ServeError::Bind {
            addr: addr.clone(),
            source: e,
        })?;
    info!("MCP server listening on http://{}/mcp", addr);

    let result = axum::serve(listener, app).await;
    cancellation_token.cancel();

    result.map_err(|e| ServeError::Transport {
        message: e.to_string(),
    })
}
