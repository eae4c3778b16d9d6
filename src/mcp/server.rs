//! MCP server implementation.
//!
//! [`DeepSourceMcpServer`] routes every tool through the [`DeepSource`]
//! trait, so the GraphQL transport can be swapped out (or mocked) without
//! touching the tool surface.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::client::api::DeepSource;

use super::tools::{
    self,
    compliance::ComplianceReportParams,
    issues::ListIssuesParams,
    metrics::QualityMetricsParams,
    projects::ListProjectsParams,
    runs::{GetRunParams, ListRunsParams},
};

/// Main MCP server, generic over the DeepSource API implementation.
pub struct DeepSourceMcpServer<D: DeepSource> {
    deepsource: Arc<D>,
    tool_router: ToolRouter<Self>,
}

impl<D: DeepSource> Clone for DeepSourceMcpServer<D> {
    fn clone(&self) -> Self {
        Self {
            deepsource: Arc::clone(&self.deepsource),
            tool_router: self.tool_router.clone(),
        }
    }
}

#[tool_router]
impl<D: DeepSource + 'static> DeepSourceMcpServer<D> {
    /// Create a new MCP server backed by the given DeepSource API.
    pub fn new(deepsource: impl Into<Arc<D>>) -> Self {
        Self {
            deepsource: deepsource.into(),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "List DeepSource projects visible to the configured API key. Supports cursor pagination (first/after, last/before) and merging several pages via max_pages."
    )]
    pub async fn list_projects(
        &self,
        params: Parameters<ListProjectsParams>,
    ) -> Result<CallToolResult, McpError> {
        let page = self
            .deepsource
            .list_projects(params.0.page)
            .await
            .map_err(tools::map_client_error)?;

        tools::serialize_result(&page)
    }

    #[tool(
        description = "List analysis runs for a project, most recent first. Supports cursor pagination and max_pages aggregation."
    )]
    pub async fn list_runs(
        &self,
        params: Parameters<ListRunsParams>,
    ) -> Result<CallToolResult, McpError> {
        let page = self
            .deepsource
            .list_runs(&params.0.project_key, params.0.page)
            .await
            .map_err(tools::map_client_error)?;

        tools::serialize_result(&page)
    }

    #[tool(description = "Get a single analysis run by its UID, with status and occurrence summary.")]
    pub async fn get_run(
        &self,
        params: Parameters<GetRunParams>,
    ) -> Result<CallToolResult, McpError> {
        let run = self
            .deepsource
            .get_run(&params.0.run_uid)
            .await
            .map_err(tools::map_client_error)?;

        tools::serialize_result(&run)
    }

    #[tool(
        description = "List issues raised in a project, with a sample of occurrences per issue. Filter by file path or analyzer shortcode; supports cursor pagination and max_pages aggregation."
    )]
    pub async fn list_issues(
        &self,
        params: Parameters<ListIssuesParams>,
    ) -> Result<CallToolResult, McpError> {
        let filter = params.0.filter();
        let page = self
            .deepsource
            .list_issues(&params.0.project_key, filter, params.0.page)
            .await
            .map_err(tools::map_client_error)?;

        tools::serialize_result(&page)
    }

    #[tool(
        description = "Fetch quality metrics for a project (coverage, duplication, ...), optionally restricted to specific shortcodes."
    )]
    pub async fn quality_metrics(
        &self,
        params: Parameters<QualityMetricsParams>,
    ) -> Result<CallToolResult, McpError> {
        let shortcodes = params.0.shortcodes()?;
        let metrics = self
            .deepsource
            .quality_metrics(&params.0.project_key, shortcodes)
            .await
            .map_err(tools::map_client_error)?;

        tools::serialize_result(&metrics)
    }

    #[tool(
        description = "Fetch a compliance report (OWASP Top 10, SANS Top 25, MISRA-C, code coverage) for a project."
    )]
    pub async fn compliance_report(
        &self,
        params: Parameters<ComplianceReportParams>,
    ) -> Result<CallToolResult, McpError> {
        let kind = params.0.kind()?;
        let report = self
            .deepsource
            .compliance_report(&params.0.project_key, kind)
            .await
            .map_err(tools::map_client_error)?;

        tools::serialize_result(&report)
    }
}

#[tool_handler]
impl<D: DeepSource + 'static> ServerHandler for DeepSourceMcpServer<D> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_instructions(
                "DeepSource MCP Server - Query projects, analysis runs, issues, quality metrics, and compliance reports",
            )
    }
}
