//! Parameters for compliance report tools.

use rmcp::ErrorData as McpError;
use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::models::ReportKind;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceReportParams {
    #[schemars(description = "Project key (DSN) identifying the repository")]
    pub project_key: String,
    #[schemars(
        description = "Report to fetch: 'owasp-top-10', 'sans-top-25', 'misra-c', or 'code-coverage'"
    )]
    pub report_type: String,
}

impl ComplianceReportParams {
    /// Parse the requested report kind, rejecting unknown names.
    pub fn kind(&self) -> Result<ReportKind, McpError> {
        self.report_type.parse::<ReportKind>().map_err(|e| {
            McpError::invalid_params(
                "invalid_report_type",
                Some(serde_json::json!({ "error": e })),
            )
        })
    }
}
