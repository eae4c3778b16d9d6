use tabled::{Table, Tabled};

use crate::cli::utils::{apply_table_style, truncate_with_ellipsis};
use crate::client::api::{DeepSource, IssueFilter};
use crate::client::error::ClientResult;
use crate::client::pagination::PaginationParams;
use crate::models::Issue;

#[derive(Tabled)]
pub(crate) struct IssueDisplay {
    #[tabled(rename = "Shortcode")]
    pub(crate) shortcode: String,
    #[tabled(rename = "Severity")]
    pub(crate) severity: String,
    #[tabled(rename = "Title")]
    pub(crate) title: String,
    #[tabled(rename = "Occurrences")]
    pub(crate) occurrences: String,
}

impl From<&Issue> for IssueDisplay {
    fn from(issue: &Issue) -> Self {
        Self {
            shortcode: issue.shortcode.clone(),
            severity: issue.severity.to_string(),
            title: truncate_with_ellipsis(&issue.title, 50),
            occurrences: issue.occurrence_count.to_string(),
        }
    }
}

/// Filter parameters for listing issues
pub struct ListIssuesFilter<'a> {
    pub path: Option<&'a str>,
    pub analyzer: Option<&'a str>,
    pub limit: i64,
}

/// List issues raised in a project with optional filtering
pub async fn list<D: DeepSource + ?Sized>(
    deepsource: &D,
    project_key: &str,
    filter: ListIssuesFilter<'_>,
    format: &str,
) -> ClientResult<String> {
    let page = deepsource
        .list_issues(
            project_key,
            IssueFilter {
                path: filter.path.map(|s| s.to_string()),
                analyzer: filter.analyzer.map(|s| s.to_string()),
            },
            PaginationParams {
                first: Some(filter.limit),
                ..Default::default()
            },
        )
        .await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&page.items)?),
        _ => Ok(format_table(&page.items)),
    }
}

pub(crate) fn format_table(issues: &[Issue]) -> String {
    if issues.is_empty() {
        return "No issues found.".to_string();
    }

    let rows: Vec<IssueDisplay> = issues.iter().map(|i| i.into()).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}
