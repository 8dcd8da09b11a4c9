//! Output formatting module
//!
//! Handles the table and JSON renderings of data source state

mod common;
mod variables;
mod workspace_ids;

pub use common::output_json;
pub use variables::output_workspace_variables;
pub use workspace_ids::output_workspace_ids;
