//! Data source readers
//!
//! Each reader takes a typed configuration, validates it, pages through the
//! API and returns a flat, serializable state. Readers hold no state between
//! invocations.

mod commands;
mod workspace_ids;
mod workspace_variables;

pub use commands::run_read_command;
pub use workspace_ids::{read_workspace_ids, WorkspaceIdsConfig, WorkspaceIdsState};
pub use workspace_variables::{
    read_workspace_variables, VariableEntry, WorkspaceVariablesConfig, WorkspaceVariablesState,
};
