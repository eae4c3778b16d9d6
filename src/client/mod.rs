//! DeepSource GraphQL client.
//!
//! [`DeepSourceClient`] owns the HTTP transport; queries and variable
//! builders live in [`queries`], pagination canonicalization and
//! aggregation in [`pagination`], and the trait seam consumed by tools
//! in [`api`].

pub mod api;
pub mod error;
pub mod pagination;
pub mod queries;

#[cfg(test)]
mod queries_test;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::env;

use crate::models::{
    AnalysisRun, ComplianceReport, ComplianceReportNode, Connection, Issue, MetricShortcode,
    Project, QualityMetric, ReportKind, RepositoryIssueNode,
};

use api::{DeepSource, IssueFilter};
use error::{ClientError, ClientResult};
use pagination::{PaginatedResponse, PaginationParams, fetch_with_pagination};

/// DeepSource's hosted GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.deepsource.io/graphql/";

/// Client for the DeepSource GraphQL API.
pub struct DeepSourceClient {
    endpoint: String,
    api_key: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl DeepSourceClient {
    /// Create a new client.
    ///
    /// Priority for the API key:
    /// 1. Explicit `api_key` parameter
    /// 2. DEEPSOURCE_API_KEY environment variable
    ///
    /// Priority for the endpoint:
    /// 1. Explicit `endpoint` parameter
    /// 2. DEEPSOURCE_API_URL environment variable
    /// 3. Default: https://api.deepsource.io/graphql/
    pub fn new(api_key: Option<String>, endpoint: Option<String>) -> ClientResult<Self> {
        // reqwest is built without a default TLS provider; ring must be
        // installed before the first connection.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let api_key = api_key
            .or_else(|| env::var("DEEPSOURCE_API_KEY").ok())
            .filter(|k| !k.is_empty())
            .ok_or(ClientError::MissingApiKey)?;

        let endpoint = endpoint
            .or_else(|| env::var("DEEPSOURCE_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Ok(Self {
            endpoint,
            api_key,
            client: Client::new(),
        })
    }

    /// Get the endpoint being used.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a GraphQL query and return its `data` payload.
    ///
    /// Non-success HTTP statuses and GraphQL-level `errors` both surface
    /// as errors; a body with neither `data` nor `errors` is treated as
    /// malformed.
    pub async fn execute(&self, query: &str, variables: Value) -> ClientResult<Value> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Api { status, message });
        }

        let body: GraphQlResponse =
            response
                .json()
                .await
                .map_err(|e| ClientError::InvalidResponse {
                    message: e.to_string(),
                })?;

        if let Some(errors) = body.errors.filter(|e| !e.is_empty()) {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ClientError::GraphQl { message });
        }

        body.data.ok_or_else(|| ClientError::InvalidResponse {
            message: "response carried neither data nor errors".to_string(),
        })
    }

    /// Walk a response path, failing with the full dotted path on a
    /// missing field.
    fn pluck<'a>(data: &'a Value, path: &[&str]) -> ClientResult<&'a Value> {
        let mut current = data;
        for key in path {
            current = current
                .get(key)
                .ok_or_else(|| ClientError::InvalidResponse {
                    message: format!("missing field '{}' in response", path.join(".")),
                })?;
        }
        Ok(current)
    }

    /// Resolve the `repository` field, mapping a null repository to a
    /// not-found error for the given project key.
    fn repository<'a>(data: &'a Value, project_key: &str) -> ClientResult<&'a Value> {
        match data.get("repository") {
            Some(repo) if !repo.is_null() => Ok(repo),
            _ => Err(ClientError::NotFound {
                entity: "project".to_string(),
                identifier: project_key.to_string(),
            }),
        }
    }

    async fn fetch_projects_page(
        &self,
        page: PaginationParams,
    ) -> ClientResult<PaginatedResponse<Project>> {
        let data = self
            .execute(queries::PROJECTS_QUERY, queries::projects_variables(&page))
            .await?;
        let connection = Self::pluck(&data, &["viewer", "repositories"])?;
        let connection: Connection<Project> = serde_json::from_value(connection.clone())?;
        Ok(connection.into_page())
    }

    async fn fetch_runs_page(
        &self,
        project_key: &str,
        page: PaginationParams,
    ) -> ClientResult<PaginatedResponse<AnalysisRun>> {
        let data = self
            .execute(queries::RUNS_QUERY, queries::runs_variables(project_key, &page))
            .await?;
        let repo = Self::repository(&data, project_key)?;
        let connection = Self::pluck(repo, &["analysisRuns"])?;
        let connection: Connection<AnalysisRun> = serde_json::from_value(connection.clone())?;
        Ok(connection.into_page())
    }

    async fn fetch_issues_page(
        &self,
        project_key: &str,
        filter: &IssueFilter,
        page: PaginationParams,
    ) -> ClientResult<PaginatedResponse<Issue>> {
        let variables = queries::issues_variables(
            project_key,
            filter.path.as_deref(),
            filter.analyzer.as_deref(),
            &page,
        );
        let data = self.execute(queries::ISSUES_QUERY, variables).await?;
        let repo = Self::repository(&data, project_key)?;
        let connection = Self::pluck(repo, &["issues"])?;
        let connection: Connection<RepositoryIssueNode> =
            serde_json::from_value(connection.clone())?;
        Ok(connection.into_page().map(Issue::from))
    }
}

#[async_trait]
impl DeepSource for DeepSourceClient {
    async fn list_projects(
        &self,
        page: PaginationParams,
    ) -> ClientResult<PaginatedResponse<Project>> {
        fetch_with_pagination(|p| self.fetch_projects_page(p), page).await
    }

    async fn list_runs(
        &self,
        project_key: &str,
        page: PaginationParams,
    ) -> ClientResult<PaginatedResponse<AnalysisRun>> {
        fetch_with_pagination(|p| self.fetch_runs_page(project_key, p), page).await
    }

    async fn get_run(&self, run_uid: &str) -> ClientResult<AnalysisRun> {
        let data = self
            .execute(queries::RUN_QUERY, queries::run_variables(run_uid))
            .await?;
        match data.get("run") {
            Some(run) if !run.is_null() => Ok(serde_json::from_value(run.clone())?),
            _ => Err(ClientError::NotFound {
                entity: "run".to_string(),
                identifier: run_uid.to_string(),
            }),
        }
    }

    async fn list_issues(
        &self,
        project_key: &str,
        filter: IssueFilter,
        page: PaginationParams,
    ) -> ClientResult<PaginatedResponse<Issue>> {
        fetch_with_pagination(|p| self.fetch_issues_page(project_key, &filter, p), page).await
    }

    async fn quality_metrics(
        &self,
        project_key: &str,
        shortcodes: Option<Vec<MetricShortcode>>,
    ) -> ClientResult<Vec<QualityMetric>> {
        let variables = queries::metrics_variables(project_key, shortcodes.as_deref());
        let data = self.execute(queries::METRICS_QUERY, variables).await?;
        let repo = Self::repository(&data, project_key)?;
        match repo.get("metrics") {
            Some(metrics) if !metrics.is_null() => Ok(serde_json::from_value(metrics.clone())?),
            _ => Ok(Vec::new()),
        }
    }

    async fn compliance_report(
        &self,
        project_key: &str,
        kind: ReportKind,
    ) -> ClientResult<ComplianceReport> {
        let data = self
            .execute(queries::REPORT_QUERY, queries::report_variables(project_key, kind))
            .await?;
        let repo = Self::repository(&data, project_key)?;
        match repo.get("report") {
            Some(report) if !report.is_null() => {
                let node: ComplianceReportNode = serde_json::from_value(report.clone())?;
                Ok(node.into())
            }
            _ => Err(ClientError::NotFound {
                entity: "report".to_string(),
                identifier: kind.to_string(),
            }),
        }
    }
}
