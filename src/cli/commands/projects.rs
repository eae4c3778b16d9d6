use tabled::{Table, Tabled};

use crate::cli::utils::apply_table_style;
use crate::client::api::DeepSource;
use crate::client::error::ClientResult;
use crate::client::pagination::PaginationParams;
use crate::models::Project;

#[derive(Tabled)]
pub(crate) struct ProjectDisplay {
    #[tabled(rename = "Name")]
    pub(crate) name: String,
    #[tabled(rename = "DSN")]
    pub(crate) dsn: String,
    #[tabled(rename = "Provider")]
    pub(crate) provider: String,
    #[tabled(rename = "Active")]
    pub(crate) active: String,
}

impl From<&Project> for ProjectDisplay {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            dsn: project.dsn.clone(),
            provider: project
                .vcs_provider
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            active: if project.is_activated { "yes" } else { "no" }.to_string(),
        }
    }
}

/// List projects visible to the configured API key
pub async fn list<D: DeepSource + ?Sized>(
    deepsource: &D,
    limit: i64,
    format: &str,
) -> ClientResult<String> {
    let page = deepsource
        .list_projects(PaginationParams {
            first: Some(limit),
            ..Default::default()
        })
        .await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&page.items)?),
        _ => Ok(format_table(&page.items)),
    }
}

pub(crate) fn format_table(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects found.".to_string();
    }

    let rows: Vec<ProjectDisplay> = projects.iter().map(|p| p.into()).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}
