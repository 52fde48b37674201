//! Operator view of a snippet's version history.
//!
//! Reads the store directly, so private snippets are visible too.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use snipvault_core::config::AppConfig;
use snipvault_core::error::AppError;
use snipvault_core::types::{PageRequest, SortDirection};
use snipvault_entity::version::{ChangeType, ChangeTypeCounts, VersionQuery, VersionStats};

use crate::output::{self, OutputFormat};

/// Arguments for history commands
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// History subcommand
    #[command(subcommand)]
    pub command: HistoryCommand,
}

/// History subcommands
#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List versions of a snippet
    List {
        /// Snippet id
        snippet_id: Uuid,
        /// Filter by change type (create, update, restore)
        #[arg(long)]
        change_type: Option<ChangeType>,
        /// Oldest first
        #[arg(long)]
        asc: bool,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Page size
        #[arg(long, default_value_t = 20)]
        per_page: u64,
    },
    /// Show aggregate statistics for a snippet
    Stats {
        /// Snippet id
        snippet_id: Uuid,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct VersionRow {
    number: i32,
    change_type: String,
    added: i32,
    removed: i32,
    author: String,
    created_at: String,
    summary: String,
}

/// Execute history commands
pub async fn execute(
    args: &HistoryArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = snipvault_database::open_store(&config.database).await?;

    match &args.command {
        HistoryCommand::List {
            snippet_id,
            change_type,
            asc,
            page,
            per_page,
        } => {
            if store.find_snippet(*snippet_id).await?.is_none() {
                return Err(AppError::not_found(format!("Snippet {snippet_id} not found")));
            }

            let query = VersionQuery {
                change_type: *change_type,
                sort: if *asc {
                    SortDirection::Asc
                } else {
                    SortDirection::Desc
                },
                page: PageRequest::new(*page, *per_page),
            };
            let versions = store.list_versions(*snippet_id, &query).await?;

            let rows: Vec<VersionRow> = versions
                .items
                .iter()
                .map(|v| VersionRow {
                    number: v.version_number,
                    change_type: v.change_type.to_string(),
                    added: v.lines_added,
                    removed: v.lines_removed,
                    author: v.created_by.to_string(),
                    created_at: v.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    summary: v.change_summary.clone().unwrap_or_default(),
                })
                .collect();
            output::print_list(&rows, format);

            if format == OutputFormat::Table {
                println!(
                    "Page {}/{} ({} versions)",
                    versions.page, versions.total_pages, versions.total_items
                );
            }
        }
        HistoryCommand::Stats { snippet_id } => {
            if store.find_snippet(*snippet_id).await?.is_none() {
                return Err(AppError::not_found(format!("Snippet {snippet_id} not found")));
            }

            let totals = store.version_totals(*snippet_id).await?;
            let counts = ChangeTypeCounts::from_rows(store.change_type_counts(*snippet_id).await?);
            let contributors = store.contributors(*snippet_id).await?;
            let stats = VersionStats::new(totals, counts, contributors);

            match format {
                OutputFormat::Json => output::print_json(&stats),
                OutputFormat::Table => {
                    output::print_kv("Total versions", &stats.total_versions.to_string());
                    output::print_kv("Latest version", &stats.latest_version.to_string());
                    output::print_kv("Lines added", &stats.total_lines_added.to_string());
                    output::print_kv("Lines removed", &stats.total_lines_removed.to_string());
                    output::print_kv(
                        "Change types",
                        &format!(
                            "create={} update={} restore={}",
                            stats.change_types.create,
                            stats.change_types.update,
                            stats.change_types.restore
                        ),
                    );
                    output::print_kv("Contributors", &stats.contributors_count.to_string());
                }
            }
        }
    }

    Ok(())
}
