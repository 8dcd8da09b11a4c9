//! Workspace run helpers
//!
//! Queue position lookups and run creation that follows a run through its
//! plan and apply phases.

mod commands;
mod create;
mod queue;

pub use commands::run_run_command;
pub use create::{backoff, create_workspace_run, PollBackoff, RunArgs, WorkspaceRunConfig};
pub use queue::{read_run_position_in_org_queue, read_run_position_in_workspace_queue};
