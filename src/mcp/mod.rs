//! Model Context Protocol (MCP) server implementation
//!
//! The server exposes DeepSource's static-analysis data as MCP tools:
//! projects, analysis runs, issues, quality metrics, and compliance
//! reports. It can run over stdio or Streamable HTTP.
//!
//! - **server**: tool router and handlers, generic over
//!   [`crate::client::api::DeepSource`]
//! - **service**: transport wiring (stdio, Streamable HTTP for Axum)
//! - **tools**: per-entity parameter structs and shared helpers

pub mod server;
mod service;
pub mod tools;


pub use server::DeepSourceMcpServer;
pub use service::{HttpConfig, ServeError, create_mcp_service, serve_http, serve_stdio};
