//! Tests for the issues CLI command.

use crate::cli::commands::issues::{self, ListIssuesFilter};
use crate::client::api::MockDeepSource;
use crate::client::pagination::{PageInfo, PaginatedResponse};
use crate::models::{Issue, IssueSeverity};

fn issue(shortcode: &str, title: &str) -> Issue {
    Issue {
        shortcode: shortcode.to_string(),
        title: title.to_string(),
        category: "ANTI_PATTERN".to_string(),
        severity: IssueSeverity::Major,
        occurrence_count: 3,
        occurrences: vec![],
    }
}

#[tokio::test]
async fn test_list_forwards_filters_and_renders_table() {
    let mut mock = MockDeepSource::new();
    mock.expect_list_issues()
        .withf(|key, filter, page| {
            key == "dsn://marvin"
                && filter.path.as_deref() == Some("src/app.py")
                && filter.analyzer.is_none()
                && page.first == Some(20)
        })
        .returning(|_, _, _| {
            Ok(PaginatedResponse {
                items: vec![issue("PYL-W0612", "Unused variable")],
                page_info: PageInfo::default(),
                total_count: Some(1),
            })
        });

    let filter = ListIssuesFilter {
        path: Some("src/app.py"),
        analyzer: None,
        limit: 20,
    };
    let output = issues::list(&mock, "dsn://marvin", filter, "table")
        .await
        .unwrap();
    assert!(output.contains("PYL-W0612"));
    assert!(output.contains("major"));
    assert!(output.contains("3"));
}

#[tokio::test]
async fn test_list_truncates_long_titles() {
    let long_title = "An exceptionally verbose issue title that certainly exceeds the column";
    let mut mock = MockDeepSource::new();
    mock.expect_list_issues().returning(move |_, _, _| {
        Ok(PaginatedResponse {
            items: vec![issue("SEC-001", long_title)],
            page_info: PageInfo::default(),
            total_count: Some(1),
        })
    });

    let filter = ListIssuesFilter {
        path: None,
        analyzer: None,
        limit: 10,
    };
    let output = issues::list(&mock, "dsn://marvin", filter, "table")
        .await
        .unwrap();
    assert!(output.contains("..."));
    assert!(!output.contains(long_title));
}

#[tokio::test]
async fn test_list_empty() {
    let mut mock = MockDeepSource::new();
    mock.expect_list_issues()
        .returning(|_, _, _| Ok(PaginatedResponse::default()));

    let filter = ListIssuesFilter {
        path: None,
        analyzer: None,
        limit: 10,
    };
    let output = issues::list(&mock, "dsn://marvin", filter, "table")
        .await
        .unwrap();
    assert_eq!(output, "No issues found.");
}
