//! tfe-datasource - Read HCP Terraform / Terraform Enterprise data and drive runs
//!
//! Read-only data sources over the TFE API plus helpers that create a
//! workspace run and follow it until it is applied.
//!
//! # Features
//!
//! - List the variables of a workspace or variable set
//! - Look up workspace IDs by name, wildcard and tags
//! - Report a run's position in the workspace or organization queue
//! - Create apply/destroy runs with confirmation, polling and retries
//! - Parallel page fetching with automatic pagination handling
//!
//! # Example
//!
//! ```bash
//! # Variables of a workspace
//! tfe-datasource read workspace-variables --workspace-id ws-abc123
//!
//! # Workspace IDs by tag, as JSON
//! tfe-datasource --org my-org read workspace-ids --tag-names prod -o json
//!
//! # Trigger an apply run and wait for it
//! tfe-datasource run create --workspace-id ws-abc123
//! ```

pub mod cli;
pub mod config;
pub mod datasource;
pub mod error;
pub mod hcp;
pub mod output;
pub mod ui;
pub mod workspace_run;

pub use cli::{Cli, Command, OutputFormat, ReadResource, RunAction};
pub use datasource::{
    read_workspace_ids, read_workspace_variables, run_read_command, VariableEntry,
    WorkspaceIdsConfig, WorkspaceIdsState, WorkspaceVariablesConfig, WorkspaceVariablesState,
};
pub use error::{Result, TfeError};
pub use hcp::{HostResolver, Run, TfeClient, TfeResource, TokenResolver, Variable, Workspace};
pub use workspace_run::{
    create_workspace_run, read_run_position_in_org_queue, read_run_position_in_workspace_queue,
    run_run_command, PollBackoff, RunArgs, WorkspaceRunConfig,
};
