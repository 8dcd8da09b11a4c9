//! Workspace ID lookup by name and tag

use std::collections::{BTreeMap, HashSet};

use log::debug;
use serde::Serialize;

use crate::error::{Result, TfeError};
use crate::hcp::{TfeClient, TfeResource, Workspace, WorkspaceQuery};

/// Name that selects every workspace of the organization
const WILDCARD: &str = "*";

#[derive(Debug, Clone, Default)]
pub struct WorkspaceIdsConfig {
    /// Falls back to the client's default organization
    pub organization: Option<String>,
    pub names: Vec<String>,
    pub tag_names: Vec<String>,
    pub exclude_tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceIdsState {
    pub id: String,
    pub organization: String,
    pub names: Vec<String>,
    pub tag_names: Vec<String>,
    pub exclude_tags: Vec<String>,
    /// Workspace name to workspace ID
    pub ids: BTreeMap<String, String>,
    /// Workspace name to `<organization>/<name>`
    pub full_names: BTreeMap<String, String>,
}

/// Client-side selection of the listed workspaces
struct WorkspaceFilter {
    names: HashSet<String>,
    wildcard: bool,
    only_tags: bool,
    exclude_tags: Vec<String>,
}

impl WorkspaceFilter {
    fn new(names: &[String], tag_names: &[String], exclude_tags: &[String]) -> Self {
        let names: HashSet<String> = names.iter().cloned().collect();
        let wildcard = names.contains(WILDCARD);

        Self {
            only_tags: names.is_empty() && !tag_names.is_empty(),
            names,
            wildcard,
            exclude_tags: exclude_tags.to_vec(),
        }
    }

    fn includes(&self, workspace: &Workspace) -> bool {
        let selected = self.only_tags || self.wildcard || self.names.contains(workspace.name());
        selected && !workspace.has_any_tag(&self.exclude_tags)
    }
}

fn non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .collect()
}

/// Stable numeric ID for a given set of requested names and tags
///
/// CRC32 (IEEE) of the names followed by the tag names, all concatenated.
fn state_id(organization: &str, names: &[String], tag_names: &[String]) -> String {
    let mut hasher = crc32fast::Hasher::new();
    for part in names.iter().chain(tag_names) {
        hasher.update(part.as_bytes());
    }
    format!("{}/{}", organization, hasher.finalize())
}

/// Look up workspace IDs of an organization by name and/or tag
pub async fn read_workspace_ids(
    client: &TfeClient,
    config: &WorkspaceIdsConfig,
) -> Result<WorkspaceIdsState> {
    let organization = client
        .effective_org(config.organization.as_deref())
        .ok_or_else(|| {
            TfeError::Validation(
                "organization is required (set it explicitly or via TFE_ORGANIZATION)".to_string(),
            )
        })?;

    let names: Vec<String> = config.names.iter().filter(|n| !n.is_empty()).cloned().collect();
    let tag_names = non_blank(&config.tag_names);
    let exclude_tags = non_blank(&config.exclude_tags);

    if names.is_empty() && tag_names.is_empty() {
        return Err(TfeError::Validation(
            "at least one of names or tag_names must be specified".to_string(),
        ));
    }

    let search_tags = (!tag_names.is_empty()).then(|| tag_names.join(","));
    let search_exclude = (!exclude_tags.is_empty()).then(|| exclude_tags.join(","));

    debug!(
        "Looking up workspaces in {} (names: {:?}, tags: {:?}, exclude: {:?})",
        organization, names, tag_names, exclude_tags
    );

    let workspaces = client
        .get_workspaces(
            &organization,
            WorkspaceQuery {
                search_tags: search_tags.as_deref(),
                exclude_tags: search_exclude.as_deref(),
            },
        )
        .await
        .map_err(|e| e.context("Error retrieving workspaces"))?;

    let filter = WorkspaceFilter::new(&names, &tag_names, &exclude_tags);

    let mut ids = BTreeMap::new();
    let mut full_names = BTreeMap::new();
    for ws in workspaces.iter().filter(|ws| filter.includes(ws)) {
        ids.insert(ws.name().to_string(), ws.id.clone());
        full_names.insert(
            ws.name().to_string(),
            format!("{}/{}", organization, ws.name()),
        );
    }

    debug!("Matched {} of {} workspaces", ids.len(), workspaces.len());

    Ok(WorkspaceIdsState {
        id: state_id(&organization, &names, &tag_names),
        organization,
        names,
        tag_names,
        exclude_tags,
        ids,
        full_names,
    })
}
