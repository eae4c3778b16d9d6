//! Tests for GraphQL variable builders.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::json;

use crate::client::pagination::{PaginationParams, normalize};
use crate::client::queries::{
    issues_variables, metrics_variables, offset_to_cursor, pagination_variables, report_variables,
    runs_variables,
};
use crate::models::{MetricShortcode, ReportKind};

fn params(value: serde_json::Value) -> PaginationParams {
    normalize(serde_json::from_value(value).unwrap())
}

#[test]
fn test_offset_to_cursor_matches_relay_format() {
    let cursor = offset_to_cursor(9);
    assert_eq!(STANDARD.decode(&cursor).unwrap(), b"arrayconnection:9");
}

#[test]
fn test_pagination_variables_forward() {
    let vars = pagination_variables(&params(json!({"first": 5, "after": "c1"})));
    assert_eq!(vars.get("first"), Some(&json!(5)));
    assert_eq!(vars.get("after"), Some(&json!("c1")));
    assert!(!vars.contains_key("last"));
    assert!(!vars.contains_key("before"));
}

#[test]
fn test_pagination_variables_backward() {
    let vars = pagination_variables(&params(json!({"before": "c9", "first": 5})));
    assert_eq!(vars.get("last"), Some(&json!(5)));
    assert_eq!(vars.get("before"), Some(&json!("c9")));
    assert!(!vars.contains_key("first"));
    assert!(!vars.contains_key("after"));
}

#[test]
fn test_offset_translates_to_cursor() {
    let vars = pagination_variables(&params(json!({"offset": 10, "first": 5})));
    assert_eq!(vars.get("after"), Some(&json!(offset_to_cursor(9))));

    // Offset zero means "from the start": no cursor at all.
    let vars = pagination_variables(&params(json!({"offset": 0, "first": 5})));
    assert!(!vars.contains_key("after"));
}

#[test]
fn test_explicit_cursor_wins_over_offset() {
    let vars = pagination_variables(&params(json!({"offset": 10, "after": "c1"})));
    assert_eq!(vars.get("after"), Some(&json!("c1")));
}

#[test]
fn test_runs_variables_include_dsn() {
    let vars = runs_variables("dsn://marvin", &params(json!({"first": 3})));
    assert_eq!(vars["dsn"], json!("dsn://marvin"));
    assert_eq!(vars["first"], json!(3));
}

#[test]
fn test_issues_variables_with_filters() {
    let vars = issues_variables(
        "dsn://marvin",
        Some("src/app.py"),
        Some("python"),
        &params(json!({"first": 3})),
    );
    assert_eq!(vars["path"], json!("src/app.py"));
    assert_eq!(vars["analyzer"], json!("python"));

    let vars = issues_variables("dsn://marvin", None, None, &params(json!({})));
    assert!(vars.get("path").is_none());
    assert!(vars.get("analyzer").is_none());
}

#[test]
fn test_metrics_variables_shortcode_filter() {
    let vars = metrics_variables("dsn://marvin", Some(&[MetricShortcode::Lcv, MetricShortcode::Ddp]));
    assert_eq!(vars["shortcodeIn"], json!(["LCV", "DDP"]));

    let vars = metrics_variables("dsn://marvin", None);
    assert!(vars.get("shortcodeIn").is_none());
}

#[test]
fn test_report_variables_use_graphql_key() {
    let vars = report_variables("dsn://marvin", ReportKind::OwaspTop10);
    assert_eq!(vars["key"], json!("OWASP_TOP_10"));
}
