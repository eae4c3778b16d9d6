//! Tests for analysis run MCP tools.

use chrono::{DateTime, Utc};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, RawContent};

use crate::client::api::MockDeepSource;
use crate::client::error::ClientError;
use crate::client::pagination::{PageInfo, PaginatedResponse, PaginationParams};
use crate::mcp::server::DeepSourceMcpServer;
use crate::mcp::tools::runs::{GetRunParams, ListRunsParams};
use crate::models::{AnalysisRun, RunStatus, RunSummary};

fn content_json(result: &CallToolResult) -> serde_json::Value {
    let text = match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    };
    serde_json::from_str(text).unwrap()
}

fn run(uid: &str, status: RunStatus) -> AnalysisRun {
    AnalysisRun {
        run_uid: uid.to_string(),
        commit_oid: "abc123".to_string(),
        branch_name: "main".to_string(),
        base_oid: None,
        status,
        created_at: "2025-06-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap(),
        finished_at: None,
        summary: RunSummary {
            occurrences_introduced: 2,
            occurrences_resolved: 5,
            occurrences_suppressed: 0,
        },
    }
}

#[tokio::test]
async fn test_list_runs_forwards_project_key() {
    let mut mock = MockDeepSource::new();
    mock.expect_list_runs()
        .withf(|key, page| key == "dsn://marvin" && page.first == Some(3))
        .returning(|_, _| {
            Ok(PaginatedResponse {
                items: vec![run("run-1", RunStatus::Success)],
                page_info: PageInfo::default(),
                total_count: Some(1),
            })
        });

    let server = DeepSourceMcpServer::new(mock);
    let result = server
        .list_runs(Parameters(ListRunsParams {
            project_key: "dsn://marvin".to_string(),
            page: PaginationParams {
                first: Some(3),
                ..Default::default()
            },
        }))
        .await;
    assert!(result.is_ok());

    let response = content_json(&result.unwrap());
    assert_eq!(response["items"][0]["runUid"], "run-1");
    assert_eq!(response["items"][0]["status"], "SUCCESS");
}

#[tokio::test]
async fn test_get_run_returns_summary() {
    let mut mock = MockDeepSource::new();
    mock.expect_get_run()
        .withf(|uid| uid == "run-7")
        .returning(|_| Ok(run("run-7", RunStatus::Failure)));

    let server = DeepSourceMcpServer::new(mock);
    let result = server
        .get_run(Parameters(GetRunParams {
            run_uid: "run-7".to_string(),
        }))
        .await;
    assert!(result.is_ok());

    let response = content_json(&result.unwrap());
    assert_eq!(response["runUid"], "run-7");
    assert_eq!(response["status"], "FAILURE");
    assert_eq!(response["summary"]["occurrencesResolved"], 5);
}

#[tokio::test]
async fn test_get_run_not_found() {
    let mut mock = MockDeepSource::new();
    mock.expect_get_run().returning(|uid| {
        Err(ClientError::NotFound {
            entity: "run".to_string(),
            identifier: uid.to_string(),
        })
    });

    let server = DeepSourceMcpServer::new(mock);
    let result = server
        .get_run(Parameters(GetRunParams {
            run_uid: "missing".to_string(),
        }))
        .await;
    assert!(result.is_err());
}
