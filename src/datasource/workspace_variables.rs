//! Workspace / variable set variable listing

use log::debug;
use serde::Serialize;

use crate::error::{Result, TfeError};
use crate::hcp::{TfeClient, TfeResource, Variable, VariableCategory};

/// Where to read variables from: exactly one of the two IDs must be set
#[derive(Debug, Clone, Default)]
pub struct WorkspaceVariablesConfig {
    pub workspace_id: Option<String>,
    pub variable_set_id: Option<String>,
}

enum VariableSource<'a> {
    Workspace(&'a str),
    VariableSet(&'a str),
}

impl<'a> VariableSource<'a> {
    fn id(&self) -> &'a str {
        match self {
            VariableSource::Workspace(id) | VariableSource::VariableSet(id) => id,
        }
    }
}

impl WorkspaceVariablesConfig {
    pub fn for_workspace(workspace_id: &str) -> Self {
        Self {
            workspace_id: Some(workspace_id.to_string()),
            variable_set_id: None,
        }
    }

    pub fn for_variable_set(variable_set_id: &str) -> Self {
        Self {
            workspace_id: None,
            variable_set_id: Some(variable_set_id.to_string()),
        }
    }

    fn source(&self) -> Result<VariableSource<'_>> {
        match (
            non_empty(self.workspace_id.as_deref()),
            non_empty(self.variable_set_id.as_deref()),
        ) {
            (Some(ws), None) => Ok(VariableSource::Workspace(ws)),
            (None, Some(vs)) => Ok(VariableSource::VariableSet(vs)),
            _ => Err(TfeError::Validation(
                "exactly one of workspace_id or variable_set_id must be specified".to_string(),
            )),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// One variable, flattened
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VariableEntry {
    pub id: String,
    pub category: String,
    pub hcl: bool,
    pub name: String,
    pub sensitive: bool,
    /// Empty when the variable is sensitive
    pub value: String,
}

impl From<&Variable> for VariableEntry {
    fn from(var: &Variable) -> Self {
        Self {
            id: var.id.clone(),
            category: var.category_name().to_string(),
            hcl: var.is_hcl(),
            name: var.name().to_string(),
            sensitive: var.is_sensitive(),
            value: var.value().to_string(),
        }
    }
}

/// Result of reading the variables of a workspace or variable set
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceVariablesState {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_set_id: Option<String>,
    /// Terraform variables followed by environment variables
    pub variables: Vec<VariableEntry>,
    pub terraform: Vec<VariableEntry>,
    pub env: Vec<VariableEntry>,
}

/// Read every variable of a workspace or of a variable set
pub async fn read_workspace_variables(
    client: &TfeClient,
    config: &WorkspaceVariablesConfig,
) -> Result<WorkspaceVariablesState> {
    let source = config.source()?;

    let variables = match source {
        VariableSource::Workspace(ws) => {
            debug!("Read configuration of workspace: {}", ws);
            client.list_workspace_variables(ws).await
        }
        VariableSource::VariableSet(vs) => {
            debug!("Read configuration of variable set: {}", vs);
            client.list_variable_set_variables(vs).await
        }
    }
    .map_err(|e| e.context("Error retrieving variable list"))?;

    let mut state = build_state(source.id(), &variables);
    match source {
        VariableSource::Workspace(ws) => state.workspace_id = Some(ws.to_string()),
        VariableSource::VariableSet(vs) => state.variable_set_id = Some(vs.to_string()),
    }
    Ok(state)
}

/// Partition variables into terraform and env lists, keeping API order
fn build_state(source_id: &str, variables: &[Variable]) -> WorkspaceVariablesState {
    let mut terraform = Vec::new();
    let mut env = Vec::new();

    for var in variables {
        match var.category() {
            VariableCategory::Terraform => terraform.push(VariableEntry::from(var)),
            VariableCategory::Env => env.push(VariableEntry::from(var)),
            VariableCategory::Other => {
                debug!(
                    "Skipping variable {} with category '{}'",
                    var.id,
                    var.category_name()
                );
            }
        }
    }

    let variables = terraform.iter().chain(env.iter()).cloned().collect();

    WorkspaceVariablesState {
        id: format!("variables/{}", source_id),
        workspace_id: None,
        variable_set_id: None,
        variables,
        terraform,
        env,
    }
}
