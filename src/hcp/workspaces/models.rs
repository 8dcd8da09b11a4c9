//! Workspace data models

use serde::Deserialize;

use crate::hcp::traits::TfeResource;

/// Query options for listing workspaces
#[derive(Default)]
pub struct WorkspaceQuery<'a> {
    /// Comma-separated tag names a workspace must carry
    pub search_tags: Option<&'a str>,
    /// Comma-separated tag names a workspace must not carry
    pub exclude_tags: Option<&'a str>,
}

/// Workspace data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Workspace {
    pub id: String,
    pub attributes: WorkspaceAttributes,
    pub relationships: Option<WorkspaceRelationships>,
}

/// Workspace relationships from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct WorkspaceRelationships {
    pub organization: Option<RelationshipData>,
}

/// Generic relationship data
#[derive(Deserialize, Debug, Clone)]
pub struct RelationshipData {
    pub data: Option<RelationshipId>,
}

/// Relationship ID reference
#[derive(Deserialize, Debug, Clone)]
pub struct RelationshipId {
    pub id: String,
    #[serde(rename = "type")]
    pub rel_type: Option<String>,
}

impl TfeResource for Workspace {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl Workspace {
    /// Tag names attached to the workspace
    pub fn tag_names(&self) -> &[String] {
        &self.attributes.tag_names
    }

    /// Check if the workspace carries any of the given tags
    pub fn has_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        self.attributes
            .tag_names
            .iter()
            .any(|t| tags.iter().any(|x| x.as_ref() == t))
    }

    /// Get organization name if available (from relationships)
    pub fn organization_name(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.organization.as_ref())
            .and_then(|o| o.data.as_ref())
            .map(|d| d.id.as_str())
    }
}

/// Workspace attributes from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct WorkspaceAttributes {
    pub name: String,

    #[serde(rename = "tag-names", default)]
    pub tag_names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_deserialization_with_relationships() {
        let json = serde_json::json!({
            "id": "ws-abc",
            "attributes": {
                "name": "prod-network",
                "tag-names": ["prod", "network"]
            },
            "relationships": {
                "organization": {"data": {"id": "my-org", "type": "organizations"}},
                "project": {"data": {"id": "prj-1", "type": "projects"}}
            }
        });

        let ws: Workspace = serde_json::from_value(json).unwrap();
        assert_eq!(ws.name(), "prod-network");
        assert_eq!(ws.tag_names(), ["prod", "network"]);
        assert_eq!(ws.organization_name(), Some("my-org"));
    }

    #[test]
    fn test_workspace_without_tags_or_relationships() {
        let json = serde_json::json!({
            "id": "ws-bare",
            "attributes": {"name": "bare"}
        });

        let ws: Workspace = serde_json::from_value(json).unwrap();
        assert!(ws.tag_names().is_empty());
        assert!(ws.organization_name().is_none());
        assert!(!ws.has_any_tag(&["prod"]));
    }

    #[test]
    fn test_has_any_tag() {
        let ws: Workspace = serde_json::from_value(serde_json::json!({
            "id": "ws-1",
            "attributes": {"name": "a", "tag-names": ["team-a", "staging"]}
        }))
        .unwrap();

        assert!(ws.has_any_tag(&["staging"]));
        assert!(ws.has_any_tag(&["prod".to_string(), "team-a".to_string()]));
        assert!(!ws.has_any_tag::<&str>(&[]));
    }
}
