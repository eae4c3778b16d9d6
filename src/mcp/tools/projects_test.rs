//! Tests for project MCP tools.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, RawContent};

use crate::client::api::MockDeepSource;
use crate::client::error::ClientError;
use crate::client::pagination::{PageInfo, PaginatedResponse, PaginationParams};
use crate::mcp::server::DeepSourceMcpServer;
use crate::mcp::tools::projects::ListProjectsParams;
use crate::models::Project;

fn content_json(result: &CallToolResult) -> serde_json::Value {
    let text = match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    };
    serde_json::from_str(text).unwrap()
}

fn project(name: &str) -> Project {
    Project {
        name: name.to_string(),
        dsn: format!("https://dsn.deepsource.io/{name}"),
        default_branch: Some("main".to_string()),
        vcs_provider: Some("GITHUB".to_string()),
        is_private: false,
        is_activated: true,
    }
}

#[tokio::test]
async fn test_list_projects_returns_page() {
    let mut mock = MockDeepSource::new();
    mock.expect_list_projects().returning(|_| {
        Ok(PaginatedResponse {
            items: vec![project("marvin"), project("trillian")],
            page_info: PageInfo {
                has_next_page: true,
                has_previous_page: false,
                start_cursor: None,
                end_cursor: Some("c2".to_string()),
            },
            total_count: Some(7),
        })
    });

    let server = DeepSourceMcpServer::new(mock);
    let result = server
        .list_projects(Parameters(ListProjectsParams {
            page: PaginationParams {
                first: Some(2),
                ..Default::default()
            },
        }))
        .await;
    assert!(result.is_ok());

    let call_result = result.unwrap();
    assert!(call_result.is_error.is_none() || call_result.is_error == Some(false));

    let response = content_json(&call_result);
    let items = response["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "marvin");
    assert_eq!(response["pageInfo"]["hasNextPage"], true);
    assert_eq!(response["totalCount"], 7);
}

#[tokio::test]
async fn test_list_projects_forwards_pagination() {
    let mut mock = MockDeepSource::new();
    mock.expect_list_projects()
        .withf(|page| page.first == Some(5) && page.max_pages == Some(3))
        .returning(|_| Ok(PaginatedResponse::default()));

    let server = DeepSourceMcpServer::new(mock);
    let result = server
        .list_projects(Parameters(ListProjectsParams {
            page: PaginationParams {
                first: Some(5),
                max_pages: Some(3),
                ..Default::default()
            },
        }))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_list_projects_maps_client_errors() {
    let mut mock = MockDeepSource::new();
    mock.expect_list_projects().returning(|_| {
        Err(ClientError::Api {
            status: 401,
            message: "bad token".to_string(),
        })
    });

    let server = DeepSourceMcpServer::new(mock);
    let result = server
        .list_projects(Parameters(ListProjectsParams::default()))
        .await;
    assert!(result.is_err());
}
