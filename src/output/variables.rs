//! Variable list output formatter

use comfy_table::{presets::NOTHING, Table};

use super::common::{output_json, yes_no, MASKED};
use crate::cli::OutputFormat;
use crate::datasource::WorkspaceVariablesState;

/// Output the variables of a workspace or variable set
pub fn output_workspace_variables(state: &WorkspaceVariablesState, format: &OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!();
            println!("{}", build_table(state));
            println!(
                "\nTotal: {} variable(s) ({} terraform, {} env)",
                state.variables.len(),
                state.terraform.len(),
                state.env.len()
            );
        }
        OutputFormat::Json => output_json(state),
    }
}

fn build_table(state: &WorkspaceVariablesState) -> Table {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_header(vec!["Name", "Category", "Value", "HCL", "Sensitive", "ID"]);

    for var in &state.variables {
        let value = if var.sensitive { MASKED } else { var.value.as_str() };
        table.add_row(vec![
            var.name.as_str(),
            var.category.as_str(),
            value,
            yes_no(var.hcl),
            yes_no(var.sensitive),
            var.id.as_str(),
        ]);
    }

    table
}
