//! GraphQL query documents and variable builders.
//!
//! Queries are kept as plain documents with a variable map per call; the
//! response shapes they select are deserialized by [`crate::models`].

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::{Map, Value, json};

use crate::client::pagination::PaginationParams;
use crate::models::{MetricShortcode, ReportKind};

pub const PROJECTS_QUERY: &str = "\
query Projects($first: Int, $after: String, $last: Int, $before: String) {
  viewer {
    repositories(first: $first, after: $after, last: $last, before: $before) {
      edges {
        node { name dsn defaultBranch vcsProvider isPrivate isActivated }
        cursor
      }
      pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
      totalCount
    }
  }
}";

pub const RUNS_QUERY: &str = "\
query AnalysisRuns($dsn: String!, $first: Int, $after: String, $last: Int, $before: String) {
  repository(dsn: $dsn) {
    analysisRuns(first: $first, after: $after, last: $last, before: $before) {
      edges {
        node {
          runUid commitOid branchName baseOid status createdAt finishedAt
          summary { occurrencesIntroduced occurrencesResolved occurrencesSuppressed }
        }
        cursor
      }
      pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
      totalCount
    }
  }
}";

pub const RUN_QUERY: &str = "\
query Run($runUid: UUID!) {
  run(runUid: $runUid) {
    runUid commitOid branchName baseOid status createdAt finishedAt
    summary { occurrencesIntroduced occurrencesResolved occurrencesSuppressed }
  }
}";

pub const ISSUES_QUERY: &str = "\
query RepositoryIssues($dsn: String!, $path: String, $analyzer: String, $first: Int, $after: String, $last: Int, $before: String) {
  repository(dsn: $dsn) {
    issues(path: $path, analyzerShortcode: $analyzer, first: $first, after: $after, last: $last, before: $before) {
      edges {
        node {
          issue { shortcode title category severity }
          occurrenceCount
          occurrences(first: 5) {
            edges { node { path beginLine title } }
          }
        }
        cursor
      }
      pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
      totalCount
    }
  }
}";

pub const METRICS_QUERY: &str = "\
query QualityMetrics($dsn: String!, $shortcodeIn: [MetricShortcode!]) {
  repository(dsn: $dsn) {
    metrics(shortcodeIn: $shortcodeIn) {
      name
      shortcode
      items { key threshold latestValue latestValueDisplay thresholdStatus }
    }
  }
}";

pub const REPORT_QUERY: &str = "\
query ComplianceReport($dsn: String!, $key: ReportKey!) {
  repository(dsn: $dsn) {
    report(key: $key) {
      key
      title
      status
      currentValue
      securityIssueStats { key title occurrence { total } }
    }
  }
}";

/// Encode a Relay `arrayconnection` cursor for a zero-based item index.
///
/// DeepSource's backend produces cursors in this format, which lets an
/// offset-style request be expressed as cursor paging.
pub fn offset_to_cursor(index: i64) -> String {
    STANDARD.encode(format!("arrayconnection:{index}"))
}

/// Build GraphQL variables from canonical pagination parameters.
///
/// Only present fields are emitted. When no cursor is set, a positive
/// `offset` is translated into an `after` cursor pointing at the row
/// just before it, so offset paging rides on the connection arguments.
pub fn pagination_variables(params: &PaginationParams) -> Map<String, Value> {
    let mut vars = Map::new();

    if let Some(first) = params.first {
        vars.insert("first".to_string(), json!(first));
    }
    if let Some(last) = params.last {
        vars.insert("last".to_string(), json!(last));
    }
    if let Some(after) = &params.after {
        vars.insert("after".to_string(), json!(after));
    }
    if let Some(before) = &params.before {
        vars.insert("before".to_string(), json!(before));
    }

    if params.after.is_none() && params.before.is_none() {
        if let Some(offset) = params.offset.filter(|&o| o > 0) {
            vars.insert("after".to_string(), json!(offset_to_cursor(offset - 1)));
        }
    }

    vars
}

pub fn projects_variables(params: &PaginationParams) -> Value {
    Value::Object(pagination_variables(params))
}

pub fn runs_variables(dsn: &str, params: &PaginationParams) -> Value {
    let mut vars = pagination_variables(params);
    vars.insert("dsn".to_string(), json!(dsn));
    Value::Object(vars)
}

pub fn run_variables(run_uid: &str) -> Value {
    json!({ "runUid": run_uid })
}

pub fn issues_variables(
    dsn: &str,
    path: Option<&str>,
    analyzer: Option<&str>,
    params: &PaginationParams,
) -> Value {
    let mut vars = pagination_variables(params);
    vars.insert("dsn".to_string(), json!(dsn));
    if let Some(path) = path {
        vars.insert("path".to_string(), json!(path));
    }
    if let Some(analyzer) = analyzer {
        vars.insert("analyzer".to_string(), json!(analyzer));
    }
    Value::Object(vars)
}

pub fn metrics_variables(dsn: &str, shortcodes: Option<&[MetricShortcode]>) -> Value {
    match shortcodes {
        Some(codes) => json!({ "dsn": dsn, "shortcodeIn": codes }),
        None => json!({ "dsn": dsn }),
    }
}

pub fn report_variables(dsn: &str, kind: ReportKind) -> Value {
    json!({ "dsn": dsn, "key": kind })
}
