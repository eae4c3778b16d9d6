//! Parameters for quality metric tools.

use rmcp::ErrorData as McpError;
use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::models::MetricShortcode;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct QualityMetricsParams {
    #[schemars(description = "Project key (DSN) identifying the repository")]
    pub project_key: String,
    #[schemars(
        description = "Restrict to these metric shortcodes: LCV, BCV, CCV, DCV, DDP, NCV. Omit for all metrics."
    )]
    pub shortcode_in: Option<Vec<String>>,
}

impl QualityMetricsParams {
    /// Parse the requested shortcodes, rejecting unknown codes.
    pub fn shortcodes(&self) -> Result<Option<Vec<MetricShortcode>>, McpError> {
        self.shortcode_in
            .as_ref()
            .map(|codes| {
                codes
                    .iter()
                    .map(|c| {
                        c.parse::<MetricShortcode>().map_err(|e| {
                            McpError::invalid_params(
                                "invalid_shortcode",
                                Some(serde_json::json!({ "error": e })),
                            )
                        })
                    })
                    .collect()
            })
            .transpose()
    }
}
