//! Parameters for project tools.

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::client::pagination::PaginationParams;

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListProjectsParams {
    #[serde(flatten)]
    pub page: PaginationParams,
}
