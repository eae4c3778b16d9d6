pub mod commands;
pub mod utils;

#[cfg(test)]
mod utils_test;

use clap::{Parser, Subcommand};
use miette::Result;

use crate::client::DeepSourceClient;

#[derive(Parser)]
#[command(name = "dsq")]
#[command(author, version, about = "DeepSource query CLI", long_about = None)]
pub struct Cli {
    /// Override the API key (default: DEEPSOURCE_API_KEY env)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Override the API endpoint (default: DEEPSOURCE_API_URL env or the hosted endpoint)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project commands
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Analysis run commands
    Runs {
        #[command(subcommand)]
        command: RunCommands,
    },
    /// Issue commands
    Issues {
        #[command(subcommand)]
        command: IssueCommands,
    },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List projects visible to the API key
    List {
        /// Maximum number of projects to return
        #[arg(long, default_value = "10")]
        limit: i64,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Subcommand)]
enum RunCommands {
    /// List analysis runs for a project
    List {
        /// Project key (DSN)
        project_key: String,
        /// Maximum number of runs to return
        #[arg(long, default_value = "10")]
        limit: i64,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Subcommand)]
enum IssueCommands {
    /// List issues raised in a project
    List {
        /// Project key (DSN)
        project_key: String,
        /// Filter by file path
        #[arg(long)]
        path: Option<String>,
        /// Filter by analyzer shortcode
        #[arg(long)]
        analyzer: Option<String>,
        /// Maximum number of issues to return
        #[arg(long, default_value = "10")]
        limit: i64,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Projects { command }) => {
            let client = DeepSourceClient::new(cli.api_key, cli.api_url)?;
            match command {
                ProjectCommands::List { limit, format } => {
                    let output = commands::projects::list(&client, limit, &format).await?;
                    println!("{}", output);
                }
            }
        }
        Some(Commands::Runs { command }) => {
            let client = DeepSourceClient::new(cli.api_key, cli.api_url)?;
            match command {
                RunCommands::List {
                    project_key,
                    limit,
                    format,
                } => {
                    let output = commands::runs::list(&client, &project_key, limit, &format).await?;
                    println!("{}", output);
                }
            }
        }
        Some(Commands::Issues { command }) => {
            let client = DeepSourceClient::new(cli.api_key, cli.api_url)?;
            match command {
                IssueCommands::List {
                    project_key,
                    path,
                    analyzer,
                    limit,
                    format,
                } => {
                    let filter = commands::issues::ListIssuesFilter {
                        path: path.as_deref(),
                        analyzer: analyzer.as_deref(),
                        limit,
                    };
                    let output =
                        commands::issues::list(&client, &project_key, filter, &format).await?;
                    println!("{}", output);
                }
            }
        }
        None => {
            // Show help when no command provided
            let _ = Cli::parse_from(["dsq", "--help"]);
        }
    }

    Ok(())
}
