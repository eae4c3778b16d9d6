//! Abstract DeepSource API surface.
//!
//! Tool handlers and CLI commands depend on this trait rather than the
//! concrete GraphQL client, so they can be exercised against a mock.

use async_trait::async_trait;

use crate::client::error::ClientResult;
use crate::client::pagination::{PaginatedResponse, PaginationParams};
use crate::models::{
    AnalysisRun, ComplianceReport, Issue, MetricShortcode, Project, QualityMetric, ReportKind,
};

/// Filters for listing repository issues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    /// Restrict to issues raised in this file path.
    pub path: Option<String>,
    /// Restrict to issues raised by this analyzer shortcode.
    pub analyzer: Option<String>,
}

/// Operations the DeepSource API exposes to this server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeepSource: Send + Sync {
    /// List projects visible to the configured API key.
    async fn list_projects(
        &self,
        page: PaginationParams,
    ) -> ClientResult<PaginatedResponse<Project>>;

    /// List analysis runs for a project, most recent first.
    async fn list_runs(
        &self,
        project_key: &str,
        page: PaginationParams,
    ) -> ClientResult<PaginatedResponse<AnalysisRun>>;

    /// Look up a single analysis run by its UID.
    async fn get_run(&self, run_uid: &str) -> ClientResult<AnalysisRun>;

    /// List issues raised in a project.
    async fn list_issues(
        &self,
        project_key: &str,
        filter: IssueFilter,
        page: PaginationParams,
    ) -> ClientResult<PaginatedResponse<Issue>>;

    /// Fetch quality metrics for a project, optionally restricted to
    /// specific shortcodes.
    async fn quality_metrics(
        &self,
        project_key: &str,
        shortcodes: Option<Vec<MetricShortcode>>,
    ) -> ClientResult<Vec<QualityMetric>>;

    /// Fetch one compliance report for a project.
    async fn compliance_report(
        &self,
        project_key: &str,
        kind: ReportKind,
    ) -> ClientResult<ComplianceReport>;
}
