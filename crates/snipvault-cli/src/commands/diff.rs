//! Local file diff using the same line comparison the server applies.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use snipvault_core::error::AppError;
use snipvault_service::{LineChange, compute_diff};

use crate::output::{self, OutputFormat};

/// Arguments for the diff command
#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Old version of the file
    pub old: PathBuf,
    /// New version of the file
    pub new: PathBuf,
}

#[derive(Debug, Serialize, Tabled)]
struct ChangeRow {
    line: usize,
    kind: &'static str,
    old: String,
    new: String,
}

impl From<&LineChange> for ChangeRow {
    fn from(change: &LineChange) -> Self {
        match change {
            LineChange::Add { line, content } => Self {
                line: *line,
                kind: "add",
                old: String::new(),
                new: content.clone(),
            },
            LineChange::Remove { line, content } => Self {
                line: *line,
                kind: "remove",
                old: content.clone(),
                new: String::new(),
            },
            LineChange::Modify {
                line,
                old_content,
                new_content,
            } => Self {
                line: *line,
                kind: "modify",
                old: old_content.clone(),
                new: new_content.clone(),
            },
        }
    }
}

/// Execute the diff command
pub async fn execute(args: &DiffArgs, format: OutputFormat) -> Result<(), AppError> {
    let old = read(&args.old).await?;
    let new = read(&args.new).await?;
    let diff = compute_diff(&old, &new);

    match format {
        OutputFormat::Json => output::print_json(&diff),
        OutputFormat::Table => {
            let rows: Vec<ChangeRow> = diff.changes.iter().map(ChangeRow::from).collect();
            output::print_list(&rows, format);
            println!(
                "+{} -{} ({} changed lines{})",
                diff.lines_added,
                diff.lines_removed,
                diff.total_changes,
                if diff.truncated { ", truncated" } else { "" }
            );
        }
    }

    Ok(())
}

async fn read(path: &PathBuf) -> Result<String, AppError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::validation(format!("Cannot read '{}': {e}", path.display())))
}
