//! Domain models for the DeepSource API.
//!
//! These are the typed shapes the MCP tools and CLI work with, together
//! with the Relay connection adapters that lift raw GraphQL JSON into
//! them. GraphQL node shapes that do not match a domain type one-to-one
//! get an explicit `*Node` struct plus a `From` conversion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::client::pagination::{PageInfo, PaginatedResponse};

// =============================================================================
// Relay connection adapters
// =============================================================================

/// A Relay connection as selected by the queries in
/// [`crate::client::queries`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub total_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
    #[serde(default)]
    pub cursor: Option<String>,
}

impl<T> Connection<T> {
    /// Drop the edge wrappers, keeping nodes in connection order.
    pub fn into_page(self) -> PaginatedResponse<T> {
        PaginatedResponse {
            items: self.edges.into_iter().map(|e| e.node).collect(),
            page_info: self.page_info,
            total_count: self.total_count,
        }
    }
}

// =============================================================================
// Projects
// =============================================================================

/// A repository activated on DeepSource, identified by its DSN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub dsn: String,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub vcs_provider: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_activated: bool,
}

// =============================================================================
// Analysis runs
// =============================================================================

/// Lifecycle state of an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Pending,
    Success,
    Failure,
    Timeout,
    Cancel,
    Skipped,
}

impl RunStatus {
    /// Whether the run has reached a terminal state.
    pub fn is_finished(&self) -> bool {
        !matches!(self, RunStatus::Pending)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunStatus::Pending => "pending",
            RunStatus::Success => "success",
            RunStatus::Failure => "failure",
            RunStatus::Timeout => "timeout",
            RunStatus::Cancel => "cancel",
            RunStatus::Skipped => "skipped",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RunStatus::Pending),
            "success" => Ok(RunStatus::Success),
            "failure" => Ok(RunStatus::Failure),
            "timeout" => Ok(RunStatus::Timeout),
            "cancel" => Ok(RunStatus::Cancel),
            "skipped" => Ok(RunStatus::Skipped),
            _ => Err(format!(
                "Invalid run status '{}'. Valid: pending, success, failure, timeout, cancel, skipped",
                s
            )),
        }
    }
}

/// Occurrence deltas reported for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunSummary {
    pub occurrences_introduced: i64,
    pub occurrences_resolved: i64,
    pub occurrences_suppressed: i64,
}

/// A single analysis run on a commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRun {
    pub run_uid: String,
    pub commit_oid: String,
    pub branch_name: String,
    #[serde(default)]
    pub base_oid: Option<String>,
    pub status: RunStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub summary: RunSummary,
}

// =============================================================================
// Quality metrics
// =============================================================================

/// Metric identifiers tracked per repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetricShortcode {
    /// Line coverage.
    Lcv,
    /// Branch coverage.
    Bcv,
    /// Condition coverage.
    Ccv,
    /// Documentation coverage.
    Dcv,
    /// Duplicate code percentage.
    Ddp,
    /// New code coverage.
    Ncv,
}

impl fmt::Display for MetricShortcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MetricShortcode::Lcv => "LCV",
            MetricShortcode::Bcv => "BCV",
            MetricShortcode::Ccv => "CCV",
            MetricShortcode::Dcv => "DCV",
            MetricShortcode::Ddp => "DDP",
            MetricShortcode::Ncv => "NCV",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for MetricShortcode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LCV" => Ok(MetricShortcode::Lcv),
            "BCV" => Ok(MetricShortcode::Bcv),
            "CCV" => Ok(MetricShortcode::Ccv),
            "DCV" => Ok(MetricShortcode::Dcv),
            "DDP" => Ok(MetricShortcode::Ddp),
            "NCV" => Ok(MetricShortcode::Ncv),
            _ => Err(format!(
                "Invalid metric shortcode '{}'. Valid: LCV, BCV, CCV, DCV, DDP, NCV",
                s
            )),
        }
    }
}

/// Whether a metric item currently satisfies its threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThresholdStatus {
    Passing,
    Failing,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One measured value of a metric, keyed by language or aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricItem {
    pub key: String,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub latest_value: Option<f64>,
    #[serde(default)]
    pub latest_value_display: Option<String>,
    #[serde(default)]
    pub threshold_status: ThresholdStatus,
}

/// A quality metric with its per-key measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetric {
    pub name: String,
    pub shortcode: MetricShortcode,
    #[serde(default)]
    pub items: Vec<MetricItem>,
}

// =============================================================================
// Compliance reports
// =============================================================================

/// Report families DeepSource can generate for a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportKind {
    OwaspTop10,
    SansTop25,
    MisraC,
    CodeCoverage,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReportKind::OwaspTop10 => "owasp-top-10",
            ReportKind::SansTop25 => "sans-top-25",
            ReportKind::MisraC => "misra-c",
            ReportKind::CodeCoverage => "code-coverage",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "owasp-top-10" => Ok(ReportKind::OwaspTop10),
            "sans-top-25" => Ok(ReportKind::SansTop25),
            "misra-c" => Ok(ReportKind::MisraC),
            "code-coverage" => Ok(ReportKind::CodeCoverage),
            _ => Err(format!(
                "Invalid report type '{}'. Valid: owasp-top-10, sans-top-25, misra-c, code-coverage",
                s
            )),
        }
    }
}

/// Overall verdict of a compliance report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Passing,
    Failing,
    #[default]
    #[serde(other)]
    Noop,
}

/// Per-category issue counts inside a compliance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityIssueStat {
    pub key: String,
    pub title: String,
    pub total_occurrences: i64,
}

/// GraphQL shape of `securityIssueStats` entries, with the occurrence
/// totals nested one level down.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityIssueStatNode {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub occurrence: StatTotals,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatTotals {
    #[serde(default)]
    pub total: i64,
}

impl From<SecurityIssueStatNode> for SecurityIssueStat {
    fn from(node: SecurityIssueStatNode) -> Self {
        Self {
            key: node.key,
            title: node.title,
            total_occurrences: node.occurrence.total,
        }
    }
}

/// A compliance report for a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub key: String,
    pub title: String,
    pub status: ReportStatus,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub stats: Vec<SecurityIssueStat>,
}

/// GraphQL shape of a report node.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReportNode {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default = "Vec::new")]
    pub security_issue_stats: Vec<SecurityIssueStatNode>,
}

impl From<ComplianceReportNode> for ComplianceReport {
    fn from(node: ComplianceReportNode) -> Self {
        Self {
            key: node.key,
            title: node.title,
            status: node.status,
            current_value: node.current_value,
            stats: node
                .security_issue_stats
                .into_iter()
                .map(SecurityIssueStat::from)
                .collect(),
        }
    }
}

// =============================================================================
// Issues
// =============================================================================

/// How severe an issue is considered by its analyzer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueSeverity {
    Critical,
    Major,
    Minor,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IssueSeverity::Critical => "critical",
            IssueSeverity::Major => "major",
            IssueSeverity::Minor => "minor",
            IssueSeverity::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// One place an issue was raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub path: String,
    pub begin_line: u32,
    #[serde(default)]
    pub title: Option<String>,
}

/// An issue raised in a repository, with a sample of its occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub shortcode: String,
    pub title: String,
    pub category: String,
    pub severity: IssueSeverity,
    pub occurrence_count: usize,
    #[serde(default)]
    pub occurrences: Vec<Occurrence>,
}

/// GraphQL shape of a repository issue node: issue metadata nested under
/// `issue`, occurrences as their own connection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryIssueNode {
    pub issue: IssueMeta,
    #[serde(default)]
    pub occurrence_count: usize,
    #[serde(default)]
    pub occurrences: Option<Connection<Occurrence>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueMeta {
    pub shortcode: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub severity: IssueSeverity,
}

impl From<RepositoryIssueNode> for Issue {
    fn from(node: RepositoryIssueNode) -> Self {
        Self {
            shortcode: node.issue.shortcode,
            title: node.issue.title,
            category: node.issue.category,
            severity: node.issue.severity,
            occurrence_count: node.occurrence_count,
            occurrences: node
                .occurrences
                .map(|c| c.into_page().items)
                .unwrap_or_default(),
        }
    }
}
