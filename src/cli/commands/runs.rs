use tabled::{Table, Tabled};

use crate::cli::utils::apply_table_style;
use crate::client::api::DeepSource;
use crate::client::error::ClientResult;
use crate::client::pagination::PaginationParams;
use crate::models::AnalysisRun;

#[derive(Tabled)]
pub(crate) struct RunDisplay {
    #[tabled(rename = "Run UID")]
    pub(crate) uid: String,
    #[tabled(rename = "Branch")]
    pub(crate) branch: String,
    #[tabled(rename = "Status")]
    pub(crate) status: String,
    #[tabled(rename = "Created")]
    pub(crate) created: String,
    #[tabled(rename = "Finished")]
    pub(crate) finished: String,
}

impl From<&AnalysisRun> for RunDisplay {
    fn from(run: &AnalysisRun) -> Self {
        Self {
            uid: run.run_uid.clone(),
            branch: run.branch_name.clone(),
            status: run.status.to_string(),
            created: run.created_at.format("%Y-%m-%d %H:%M").to_string(),
            finished: run
                .finished_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| {
                    if run.status.is_finished() {
                        "-".to_string()
                    } else {
                        "running".to_string()
                    }
                }),
        }
    }
}

/// List analysis runs for a project
pub async fn list<D: DeepSource + ?Sized>(
    deepsource: &D,
    project_key: &str,
    limit: i64,
    format: &str,
) -> ClientResult<String> {
    let page = deepsource
        .list_runs(
            project_key,
            PaginationParams {
                first: Some(limit),
                ..Default::default()
            },
        )
        .await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&page.items)?),
        _ => Ok(format_table(&page.items)),
    }
}

pub(crate) fn format_table(runs: &[AnalysisRun]) -> String {
    if runs.is_empty() {
        return "No runs found.".to_string();
    }

    let rows: Vec<RunDisplay> = runs.iter().map(|r| r.into()).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}
