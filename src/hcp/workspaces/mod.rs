//! Workspace module

mod api;
mod models;

pub use models::{
    RelationshipData, RelationshipId, Workspace, WorkspaceAttributes, WorkspaceQuery,
    WorkspaceRelationships,
};
