//! MCP tool parameter types and shared helpers.
//!
//! Parameter structs are organized by entity; the tool methods
//! themselves live on [`crate::mcp::server::DeepSourceMcpServer`].

pub mod compliance;
pub mod issues;
pub mod metrics;
pub mod projects;
pub mod runs;

#[cfg(test)]
mod compliance_test;
#[cfg(test)]
mod projects_test;
#[cfg(test)]
mod runs_test;

use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

use crate::client::error::ClientError;

/// Render a JSON value as a pretty-printed text tool result.
pub(crate) fn value_to_result(value: Value) -> CallToolResult {
    CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()),
    )])
}

/// Serialize a response into a text tool result.
pub(crate) fn serialize_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let value =
        serde_json::to_value(value).map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(value_to_result(value))
}

/// Map client-layer failures onto MCP error codes.
pub(crate) fn map_client_error(e: ClientError) -> McpError {
    match e {
        ClientError::NotFound { .. } => McpError::resource_not_found(e.to_string(), None),
        _ => McpError::internal_error(e.to_string(), None),
    }
}
