//! Parameters for issue tools.

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::client::api::IssueFilter;
use crate::client::pagination::PaginationParams;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListIssuesParams {
    #[schemars(description = "Project key (DSN) identifying the repository")]
    pub project_key: String,
    #[schemars(description = "Only return issues raised in this file path")]
    pub path: Option<String>,
    #[schemars(description = "Only return issues raised by this analyzer shortcode (e.g. 'python')")]
    pub analyzer: Option<String>,
    #[serde(flatten)]
    pub page: PaginationParams,
}

impl ListIssuesParams {
    pub fn filter(&self) -> IssueFilter {
        IssueFilter {
            path: self.path.clone(),
            analyzer: self.analyzer.clone(),
        }
    }
}
