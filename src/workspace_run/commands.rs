//! Run command handlers

use std::time::Duration;

use log::debug;

use crate::cli::{Cli, Command, CreateRunArgs, QueuePositionArgs, RunAction};
use crate::error::{Result, TfeError};
use crate::hcp::TfeClient;
use crate::ui::{create_spinner, finish_spinner};

use super::{
    create_workspace_run, read_run_position_in_org_queue, read_run_position_in_workspace_queue,
    PollBackoff, RunArgs, WorkspaceRunConfig,
};

/// Run the 'run' command
pub async fn run_run_command(
    client: &TfeClient,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let Command::Run { action } = &cli.command else {
        unreachable!()
    };

    match action {
        RunAction::QueuePosition(args) => print_queue_position(client, args).await?,
        RunAction::Create(args) => {
            let config = workspace_run_config(args)?;
            debug!("Creating run: {:?}", config);

            let kind = if args.destroy { "destroy" } else { "apply" };
            let message = if args.no_wait {
                format!("Creating {} run on {}...", kind, args.workspace_id)
            } else {
                format!("Running {} on {}...", kind, args.workspace_id)
            };

            let spinner = create_spinner(&message, cli.batch);
            let result = create_workspace_run(client, &config, args.destroy, 0).await;
            finish_spinner(spinner, "");

            if let Some(run_id) = result? {
                println!("{}", run_id);
            }
        }
    }

    Ok(())
}

async fn print_queue_position(client: &TfeClient, args: &QueuePositionArgs) -> Result<()> {
    match (&args.workspace_id, &args.queue_org) {
        (Some(ws), _) => {
            let position = read_run_position_in_workspace_queue(client, &args.run_id, ws).await?;
            println!("{}", position);
        }
        (None, Some(org)) => {
            let position = read_run_position_in_org_queue(client, &args.run_id, org).await?;
            println!("{}", position);
        }
        (None, None) => {
            return Err(TfeError::Validation(
                "either --workspace-id or --queue-org is required".to_string(),
            ));
        }
    }
    Ok(())
}

/// Build the run configuration for the requested run kind only
fn workspace_run_config(args: &CreateRunArgs) -> Result<WorkspaceRunConfig> {
    if args.retry_backoff_min > args.retry_backoff_max {
        return Err(TfeError::Validation(format!(
            "--retry-backoff-min ({}) must not exceed --retry-backoff-max ({})",
            args.retry_backoff_min, args.retry_backoff_max
        )));
    }

    let run_args = RunArgs {
        manual_confirm: args.manual_confirm,
        retry: !args.no_retry,
        retry_attempts: args.retry_attempts,
        retry_backoff_min: Duration::from_secs(args.retry_backoff_min),
        retry_backoff_max: Duration::from_secs(args.retry_backoff_max),
        wait_for_run: !args.no_wait,
    };

    let (apply, destroy) = if args.destroy {
        (None, Some(run_args))
    } else {
        (Some(run_args), None)
    };

    Ok(WorkspaceRunConfig {
        workspace_id: args.workspace_id.clone(),
        apply,
        destroy,
        poll: PollBackoff::default(),
    })
}
