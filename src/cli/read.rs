//! Read command resource definitions and arguments

use clap::{ArgGroup, Parser, Subcommand};

use super::common::OutputFormat;

/// Data sources for the 'read' command
#[derive(Subcommand, Debug)]
pub enum ReadResource {
    /// Variables of a workspace or a variable set
    #[command(visible_alias = "vars")]
    WorkspaceVariables(WorkspaceVariablesArgs),

    /// Workspace IDs selected by name and/or tag
    #[command(visible_alias = "ws-ids")]
    WorkspaceIds(WorkspaceIdsArgs),
}

/// Arguments for 'read workspace-variables'
#[derive(Parser, Debug)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["workspace_id", "variable_set_id"])
))]
pub struct WorkspaceVariablesArgs {
    /// Workspace ID (ws-xxx)
    #[arg(long)]
    pub workspace_id: Option<String>,

    /// Variable set ID (varset-xxx)
    #[arg(long)]
    pub variable_set_id: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for 'read workspace-ids'
#[derive(Parser, Debug)]
#[command(group(
    ArgGroup::new("selector")
        .required(true)
        .multiple(true)
        .args(["names", "tag_names"])
))]
pub struct WorkspaceIdsArgs {
    /// Workspace names, comma-separated ("*" selects all)
    #[arg(long, value_delimiter = ',')]
    pub names: Vec<String>,

    /// Tags a workspace must carry, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub tag_names: Vec<String>,

    /// Tags a workspace must not carry, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub exclude_tags: Vec<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}
