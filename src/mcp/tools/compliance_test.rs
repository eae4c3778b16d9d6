//! Tests for compliance report MCP tools.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, RawContent};

use crate::client::api::MockDeepSource;
use crate::client::error::ClientError;
use crate::mcp::server::DeepSourceMcpServer;
use crate::mcp::tools::compliance::ComplianceReportParams;
use crate::models::{ComplianceReport, ReportKind, ReportStatus, SecurityIssueStat};

fn content_json(result: &CallToolResult) -> serde_json::Value {
    let text = match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    };
    serde_json::from_str(text).unwrap()
}

fn owasp_report() -> ComplianceReport {
    ComplianceReport {
        key: "OWASP_TOP_10".to_string(),
        title: "OWASP Top 10".to_string(),
        status: ReportStatus::Failing,
        current_value: Some(12.0),
        stats: vec![SecurityIssueStat {
            key: "A1".to_string(),
            title: "Injection".to_string(),
            total_occurrences: 7,
        }],
    }
}

#[tokio::test]
async fn test_compliance_report_parses_kind() {
    let mut mock = MockDeepSource::new();
    mock.expect_compliance_report()
        .withf(|key, kind| key == "dsn://marvin" && *kind == ReportKind::OwaspTop10)
        .returning(|_, _| Ok(owasp_report()));

    let server = DeepSourceMcpServer::new(mock);
    let result = server
        .compliance_report(Parameters(ComplianceReportParams {
            project_key: "dsn://marvin".to_string(),
            report_type: "owasp-top-10".to_string(),
        }))
        .await;
    assert!(result.is_ok());

    let response = content_json(&result.unwrap());
    assert_eq!(response["status"], "FAILING");
    assert_eq!(response["stats"][0]["totalOccurrences"], 7);
}

#[tokio::test]
async fn test_compliance_report_rejects_unknown_kind() {
    let mock = MockDeepSource::new();

    let server = DeepSourceMcpServer::new(mock);
    let result = server
        .compliance_report(Parameters(ComplianceReportParams {
            project_key: "dsn://marvin".to_string(),
            report_type: "iso-9001".to_string(),
        }))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_compliance_report_not_found() {
    let mut mock = MockDeepSource::new();
    mock.expect_compliance_report().returning(|_, kind| {
        Err(ClientError::NotFound {
            entity: "report".to_string(),
            identifier: kind.to_string(),
        })
    });

    let server = DeepSourceMcpServer::new(mock);
    let result = server
        .compliance_report(Parameters(ComplianceReportParams {
            project_key: "dsn://ghost".to_string(),
            report_type: "misra-c".to_string(),
        }))
        .await;
    assert!(result.is_err());
}
