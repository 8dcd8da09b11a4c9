//! TFE API client module
//!
//! This module provides functionality to interact with the HCP Terraform /
//! Terraform Enterprise API.

mod client;
mod credentials;
mod host;
pub mod runs;
pub mod traits;
pub mod variables;
pub mod workspaces;

use serde::Deserialize;

pub use client::TfeClient;
pub use credentials::TokenResolver;
pub use host::HostResolver;
pub use runs::{Run, RunAttributes, RunCreateOptions, RunQuery, RunStatus};
pub use traits::{ApiListResponse, PaginatedResponse, TfeResource};
pub use variables::{Variable, VariableAttributes, VariableCategory};
pub use workspaces::{Workspace, WorkspaceAttributes, WorkspaceQuery};

/// Pagination metadata from TFE API (shared across resources)
#[derive(Deserialize, Debug, Default, Clone)]
pub struct PaginationMeta {
    pub pagination: Option<Pagination>,
}

/// Pagination details
#[derive(Deserialize, Debug, Clone)]
pub struct Pagination {
    #[serde(rename = "current-page")]
    pub current_page: u32,
    #[serde(rename = "total-pages")]
    pub total_pages: u32,
    #[serde(rename = "total-count")]
    pub total_count: u32,
}
