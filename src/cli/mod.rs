//! CLI argument parsing

mod common;
mod read;
mod run;

use clap::{Parser, Subcommand};

use crate::config::{defaults, organization};

pub use common::OutputFormat;
pub use read::{ReadResource, WorkspaceIdsArgs, WorkspaceVariablesArgs};
pub use run::{CreateRunArgs, QueuePositionArgs, RunAction};

/// Read HCP Terraform / Terraform Enterprise data and drive workspace runs
#[derive(Parser, Debug)]
#[command(name = "tfe-datasource")]
#[command(version)]
#[command(about = "Read TFE workspace data and trigger workspace runs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TFE host (falls back to TFE_HOSTNAME, TFE_ADDRESS, then app.terraform.io)
    #[arg(short = 'H', long, global = true)]
    pub host: Option<String>,

    /// API token (overrides env vars and credentials file)
    #[arg(short = 't', long, global = true)]
    pub token: Option<String>,

    /// Default organization
    #[arg(long, global = true, env = organization::ENV_VAR)]
    pub org: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Batch mode: no spinner
    #[arg(long, global = true, default_value_t = false)]
    pub batch: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read a data source
    Read {
        #[command(subcommand)]
        resource: ReadResource,
    },

    /// Create runs or inspect their queue position
    Run {
        #[command(subcommand)]
        action: RunAction,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from([
            "tfe-datasource",
            "read",
            "workspace-variables",
            "--workspace-id",
            "ws-1",
        ]);
        assert!(cli.host.is_none());
        assert!(cli.token.is_none());
        assert_eq!(cli.log_level, defaults::LOG_LEVEL);
        assert!(!cli.batch);
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::parse_from([
            "tfe-datasource",
            "read",
            "workspace-ids",
            "--names",
            "web",
            "-H",
            "tfe.example.com",
            "--org",
            "acme",
            "-l",
            "debug",
            "--batch",
        ]);
        assert_eq!(cli.host.as_deref(), Some("tfe.example.com"));
        assert_eq!(cli.org.as_deref(), Some("acme"));
        assert_eq!(cli.log_level, "debug");
        assert!(cli.batch);
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["tfe-datasource"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
