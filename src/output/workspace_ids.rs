//! Workspace ID lookup output formatter

use comfy_table::{presets::NOTHING, Table};

use super::common::output_json;
use crate::cli::OutputFormat;
use crate::datasource::WorkspaceIdsState;

/// Output the workspaces matched by a workspace ID lookup
pub fn output_workspace_ids(state: &WorkspaceIdsState, format: &OutputFormat) {
    match format {
        OutputFormat::Table => {
            if state.ids.is_empty() {
                println!("\nNo workspaces found matching the criteria.");
                return;
            }
            println!();
            println!("{}", build_table(state));
            println!("\nTotal: {} workspace(s)", state.ids.len());
        }
        OutputFormat::Json => output_json(state),
    }
}

fn build_table(state: &WorkspaceIdsState) -> Table {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_header(vec!["Workspace Name", "Workspace ID", "Full Name"]);

    for (name, id) in &state.ids {
        let full_name = state.full_names.get(name).map(String::as_str).unwrap_or("");
        table.add_row(vec![name.as_str(), id.as_str(), full_name]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn state(names: &[(&str, &str)]) -> WorkspaceIdsState {
        let ids: BTreeMap<String, String> = names
            .iter()
            .map(|(n, id)| (n.to_string(), id.to_string()))
            .collect();
        let full_names = names
            .iter()
            .map(|(n, _)| (n.to_string(), format!("acme/{}", n)))
            .collect();
        WorkspaceIdsState {
            id: "acme/1234".to_string(),
            organization: "acme".to_string(),
            names: names.iter().map(|(n, _)| n.to_string()).collect(),
            tag_names: vec![],
            exclude_tags: vec![],
            ids,
            full_names,
        }
    }

    #[test]
    fn test_table_rows() {
        let rendered = build_table(&state(&[("web", "ws-1"), ("db", "ws-2")])).to_string();
        assert!(rendered.contains("acme/web"));
        assert!(rendered.contains("ws-2"));
    }

    #[test]
    fn test_output_empty_does_not_panic() {
        output_workspace_ids(&state(&[]), &OutputFormat::Table);
        output_workspace_ids(&state(&[]), &OutputFormat::Json);
    }
}
