//! Run command actions and arguments

use clap::{ArgGroup, Parser, Subcommand};

use crate::config::run as run_config;

/// Actions for the 'run' command
#[derive(Subcommand, Debug)]
pub enum RunAction {
    /// Show how many runs are ahead of a run
    #[command(visible_alias = "qp")]
    QueuePosition(QueuePositionArgs),

    /// Create a run on a workspace and follow it until it finishes
    Create(CreateRunArgs),
}

/// Arguments for 'run queue-position'
#[derive(Parser, Debug)]
#[command(group(
    ArgGroup::new("queue")
        .required(true)
        .args(["workspace_id", "queue_org"])
))]
pub struct QueuePositionArgs {
    /// Run ID (run-xxx)
    #[arg(long)]
    pub run_id: String,

    /// Look the run up in this workspace's queue
    #[arg(long)]
    pub workspace_id: Option<String>,

    /// Look the run up in this organization's run queue
    #[arg(long)]
    pub queue_org: Option<String>,
}

/// Arguments for 'run create'
#[derive(Parser, Debug)]
pub struct CreateRunArgs {
    /// Workspace ID (ws-xxx)
    #[arg(long)]
    pub workspace_id: String,

    /// Create a destroy run instead of an apply run
    #[arg(long, default_value_t = false)]
    pub destroy: bool,

    /// Do not confirm the run, wait for someone else to do it
    #[arg(long, default_value_t = false)]
    pub manual_confirm: bool,

    /// Return as soon as the run is created
    #[arg(long, default_value_t = false)]
    pub no_wait: bool,

    /// Fail on the first errored run
    #[arg(long, default_value_t = false)]
    pub no_retry: bool,

    /// Maximum number of retries of an errored run
    #[arg(long, default_value_t = run_config::DEFAULT_RETRY_ATTEMPTS)]
    pub retry_attempts: u32,

    /// Minimum delay before a retry, in seconds
    #[arg(long, default_value_t = run_config::DEFAULT_RETRY_BACKOFF_MIN_SECS)]
    pub retry_backoff_min: u64,

    /// Maximum delay before a retry, in seconds
    #[arg(long, default_value_t = run_config::DEFAULT_RETRY_BACKOFF_MAX_SECS)]
    pub retry_backoff_max: u64,
}
