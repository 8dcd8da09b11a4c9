//! Read command handlers

use log::debug;

use crate::cli::{Cli, Command, ReadResource, WorkspaceIdsArgs, WorkspaceVariablesArgs};
use crate::hcp::TfeClient;
use crate::output::{output_workspace_ids, output_workspace_variables};
use crate::ui::{create_spinner, finish_spinner};

use super::{
    read_workspace_ids, read_workspace_variables, WorkspaceIdsConfig, WorkspaceVariablesConfig,
};

/// Run the 'read' command
pub async fn run_read_command(
    client: &TfeClient,
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    let Command::Read { resource } = &cli.command else {
        unreachable!()
    };

    match resource {
        ReadResource::WorkspaceVariables(args) => {
            let config = variables_config(args);
            debug!("Reading variables: {:?}", config);

            let spinner = create_spinner("Fetching variables...", cli.batch);
            let result = read_workspace_variables(client, &config).await;
            finish_spinner(spinner, "");

            output_workspace_variables(&result?, &args.output);
        }
        ReadResource::WorkspaceIds(args) => {
            let config = workspace_ids_config(args);
            debug!("Reading workspace IDs: {:?}", config);

            let spinner = create_spinner("Fetching workspaces...", cli.batch);
            let result = read_workspace_ids(client, &config).await;
            finish_spinner(spinner, "");

            output_workspace_ids(&result?, &args.output);
        }
    }

    Ok(())
}

fn variables_config(args: &WorkspaceVariablesArgs) -> WorkspaceVariablesConfig {
    WorkspaceVariablesConfig {
        workspace_id: args.workspace_id.clone(),
        variable_set_id: args.variable_set_id.clone(),
    }
}

/// The organization comes from the client's default (`--org` / TFE_ORGANIZATION)
fn workspace_ids_config(args: &WorkspaceIdsArgs) -> WorkspaceIdsConfig {
    WorkspaceIdsConfig {
        organization: None,
        names: args.names.clone(),
        tag_names: args.tag_names.clone(),
        exclude_tags: args.exclude_tags.clone(),
    }
}
