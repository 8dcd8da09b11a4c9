//! Workspace API operations

use crate::config::api;
use crate::error::Result;
use crate::hcp::traits::ApiListResponse;
use crate::hcp::TfeClient;

use super::models::{Workspace, WorkspaceQuery};

/// Build the API path for workspaces with optional query params
fn build_workspaces_path(org: &str, query: &WorkspaceQuery<'_>) -> String {
    let mut path = format!("/{}/{}/{}", api::ORGANIZATIONS, org, api::WORKSPACES);

    let mut query_parts = Vec::new();
    if let Some(tags) = query.search_tags {
        query_parts.push(format!("search[tags]={}", urlencoding::encode(tags)));
    }
    if let Some(tags) = query.exclude_tags {
        query_parts.push(format!("search[exclude-tags]={}", urlencoding::encode(tags)));
    }

    if !query_parts.is_empty() {
        path.push('?');
        path.push_str(&query_parts.join("&"));
    }

    path
}

impl TfeClient {
    /// Get workspaces for an organization with optional filters
    ///
    /// Uses API query parameters for server-side filtering:
    /// - `search[tags]` for required tags
    /// - `search[exclude-tags]` for excluded tags
    pub async fn get_workspaces(
        &self,
        org: &str,
        query: WorkspaceQuery<'_>,
    ) -> Result<Vec<Workspace>> {
        let path = build_workspaces_path(org, &query);

        let error_context = format!(
            "workspaces for organization '{}' (tags: {:?}, exclude-tags: {:?})",
            org, query.search_tags, query.exclude_tags
        );

        self.fetch_all_pages::<Workspace, ApiListResponse<Workspace>>(&path, &error_context)
            .await
    }

    /// Get a single workspace by ID
    pub async fn get_workspace_by_id(&self, workspace_id: &str) -> Result<Option<Workspace>> {
        let path = format!("/{}/{}", api::WORKSPACES, workspace_id);
        self.fetch_resource_by_path::<Workspace>(&path, &format!("workspace '{}'", workspace_id))
            .await
    }
}
