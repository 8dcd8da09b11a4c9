//! Run queue position lookups

use log::debug;

use crate::error::Result;
use crate::hcp::{Run, RunQuery, TfeClient};

/// Number of active runs a workspace processes before `run_id`
///
/// Returns 0 when the run is not among the workspace's non-final runs.
pub async fn read_run_position_in_workspace_queue(
    client: &TfeClient,
    run_id: &str,
    workspace_id: &str,
) -> Result<usize> {
    let runs = client
        .get_runs_for_workspace(workspace_id, RunQuery::non_final())
        .await
        .map_err(|e| {
            e.context(&format!(
                "unable to read run list for workspace {}",
                workspace_id
            ))
        })?;

    let position = position_in_run_list(&runs, run_id);
    debug!(
        "Run {} is at position {} in workspace {} queue",
        run_id, position, workspace_id
    );
    Ok(position)
}

/// Position of `run_id` in the organization run queue, 0 when absent
pub async fn read_run_position_in_org_queue(
    client: &TfeClient,
    run_id: &str,
    organization: &str,
) -> Result<u32> {
    let queue = client
        .get_organization_run_queue(organization)
        .await
        .map_err(|e| {
            e.context(&format!(
                "unable to read run queue for organization {}",
                organization
            ))
        })?;

    let position = queue
        .iter()
        .find(|run| run.id == run_id)
        .map(Run::position_in_queue)
        .unwrap_or(0);

    debug!(
        "Run {} is at position {} in organization {} queue",
        run_id, position, organization
    );
    Ok(position)
}

/// Runs are listed newest first; everything active after `run_id` goes ahead of it
///
/// Statuses this client does not know are counted, the list being filtered to
/// non-final runs server-side.
fn position_in_run_list(runs: &[Run], run_id: &str) -> usize {
    let Some(index) = runs.iter().position(|run| run.id == run_id) else {
        return 0;
    };

    runs[index + 1..]
        .iter()
        .filter(|run| run.run_status().map_or(true, |s| s.is_non_final()))
        .count()
}
