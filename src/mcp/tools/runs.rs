//! Parameters for analysis run tools.

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::client::pagination::PaginationParams;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListRunsParams {
    #[schemars(description = "Project key (DSN) identifying the repository")]
    pub project_key: String,
    #[serde(flatten)]
    pub page: PaginationParams,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetRunParams {
    #[schemars(description = "UID of the analysis run")]
    pub run_uid: String,
}
