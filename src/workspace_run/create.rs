//! Run creation with plan/apply tracking and retries

use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};
use tokio::time::sleep;

use crate::config::run as run_config;
use crate::error::{Result, TfeError};
use crate::hcp::{Run, RunCreateOptions, RunStatus, TfeClient};

use super::queue::{read_run_position_in_org_queue, read_run_position_in_workspace_queue};

/// Behaviour of one run kind (apply or destroy)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Leave confirmation to someone else
    pub manual_confirm: bool,
    pub retry: bool,
    pub retry_attempts: u32,
    pub retry_backoff_min: Duration,
    pub retry_backoff_max: Duration,
    /// When false, return as soon as the run is created
    pub wait_for_run: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            manual_confirm: false,
            retry: true,
            retry_attempts: run_config::DEFAULT_RETRY_ATTEMPTS,
            retry_backoff_min: Duration::from_secs(run_config::DEFAULT_RETRY_BACKOFF_MIN_SECS),
            retry_backoff_max: Duration::from_secs(run_config::DEFAULT_RETRY_BACKOFF_MAX_SECS),
            wait_for_run: true,
        }
    }
}

/// Delay bounds between two polls of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollBackoff {
    pub min: Duration,
    pub max: Duration,
}

impl Default for PollBackoff {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(run_config::POLL_BACKOFF_MIN_MS),
            max: Duration::from_millis(run_config::POLL_BACKOFF_MAX_MS),
        }
    }
}

impl PollBackoff {
    fn delay(&self, iteration: u32) -> Duration {
        backoff(self.min, self.max, iteration)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WorkspaceRunConfig {
    pub workspace_id: String,
    /// Runs created on apply; `None` means applies are no-ops
    pub apply: Option<RunArgs>,
    /// Runs created on destroy; `None` means destroys are no-ops
    pub destroy: Option<RunArgs>,
    pub poll: PollBackoff,
}

/// `min * 2^(iteration / 5)`, capped at `max`
pub fn backoff(min: Duration, max: Duration, iteration: u32) -> Duration {
    let factor = 2u32.saturating_pow(iteration / 5);
    min.saturating_mul(factor).min(max)
}

enum RunOutcome {
    Finished(String),
    /// Run errored; carries the message to surface if no retry is left
    Errored(String),
}

/// Create a run on the configured workspace and follow it to completion
///
/// Returns `None` when destroy runs are not configured, and a random
/// placeholder ID when apply runs are not configured.
pub async fn create_workspace_run(
    client: &TfeClient,
    config: &WorkspaceRunConfig,
    is_destroy_run: bool,
    current_retry_attempts: u32,
) -> Result<Option<String>> {
    let args = if is_destroy_run {
        config.destroy.as_ref()
    } else {
        config.apply.as_ref()
    };

    let Some(args) = args else {
        if is_destroy_run {
            debug!("No destroy run configured, skipping");
            return Ok(None);
        }
        debug!("No apply run configured, returning placeholder ID");
        return Ok(Some(placeholder_run_id()));
    };

    let mut attempt = current_retry_attempts;
    loop {
        match run_once(client, config, args, is_destroy_run).await? {
            RunOutcome::Finished(run_id) => return Ok(Some(run_id)),
            RunOutcome::Errored(message) => {
                if !args.retry || attempt >= args.retry_attempts {
                    return Err(TfeError::Run(message));
                }
                attempt += 1;
                let delay = backoff(args.retry_backoff_min, args.retry_backoff_max, attempt);
                warn!(
                    "{}; retrying in {:?} (attempt {}/{})",
                    message, delay, attempt, args.retry_attempts
                );
                sleep(delay).await;
            }
        }
    }
}

async fn run_once(
    client: &TfeClient,
    config: &WorkspaceRunConfig,
    args: &RunArgs,
    is_destroy_run: bool,
) -> Result<RunOutcome> {
    let workspace_id = config.workspace_id.as_str();

    let workspace = client
        .get_workspace_by_id(workspace_id)
        .await
        .map_err(|e| e.context(&format!("error reading workspace {}", workspace_id)))?
        .ok_or_else(|| TfeError::Api {
            status: 404,
            message: format!("Workspace '{}' not found", workspace_id),
        })?;

    // A waiting caller confirms the run itself
    let auto_apply = !args.wait_for_run && !args.manual_confirm;

    let run = client
        .create_run(&RunCreateOptions {
            workspace_id: workspace_id.to_string(),
            is_destroy: is_destroy_run,
            message: run_message(),
            auto_apply,
        })
        .await?;

    info!(
        "Created {} run {} for workspace {} (auto-apply: {})",
        if run.is_destroy() { "destroy" } else { "apply" },
        run.id,
        run.workspace_id().unwrap_or(workspace_id),
        run.auto_apply()
    );

    if !args.wait_for_run {
        return Ok(RunOutcome::Finished(run.id));
    }

    let watcher = RunWatcher {
        client,
        workspace_id,
        organization: workspace.organization_name(),
        poll: config.poll,
    };

    let mut run = watcher.await_run(&run.id, is_plan_pending).await?;

    match run.run_status() {
        Some(RunStatus::Errored) | Some(RunStatus::PolicySoftFailed) => {
            return Ok(RunOutcome::Errored(format!(
                "run errored during plan, use the run ID {} to debug error",
                run.id
            )));
        }
        Some(RunStatus::PolicyOverride) => {
            info!("Run {} needs a policy override, waiting", run.id);
            run = watcher
                .await_run(&run.id, |s| *s == RunStatus::PolicyOverride)
                .await?;
        }
        Some(RunStatus::PlannedAndFinished) => {
            info!("Run {} has no changes", run.id);
            return Ok(RunOutcome::Finished(run.id));
        }
        _ => debug!("Run {} planned, has changes: {}", run.id, run.has_changes()),
    }

    if args.manual_confirm {
        info!("Waiting for run {} to be confirmed", run.id);
    } else if run.is_confirmable() {
        client.apply_run(&run.id, run_config::APPLY_COMMENT).await?;
        debug!("Confirmed run {}", run.id);
    }

    let run = watcher
        .await_run(&run.id, |s| is_awaiting_confirmation(s) || is_apply_pending(s))
        .await?;

    match run.run_status() {
        Some(RunStatus::Applied) => Ok(RunOutcome::Finished(run.id)),
        Some(RunStatus::Errored) => Ok(RunOutcome::Errored(format!(
            "run errored during apply, use the run ID {} to debug error",
            run.id
        ))),
        _ => Err(TfeError::Run(format!(
            "run {} finished with unexpected status: {}",
            run.id,
            run.status()
        ))),
    }
}

/// Polls a run and reports where it sits in the queue meanwhile
struct RunWatcher<'a> {
    client: &'a TfeClient,
    workspace_id: &'a str,
    organization: Option<&'a str>,
    poll: PollBackoff,
}

impl RunWatcher<'_> {
    /// Poll until the run leaves the statuses matched by `pending`
    ///
    /// A status this client cannot parse is never taken as the end of a phase.
    async fn await_run(&self, run_id: &str, pending: impl Fn(&RunStatus) -> bool) -> Result<Run> {
        let mut iteration = 0;
        loop {
            let run = self
                .client
                .get_run_by_id(run_id)
                .await
                .map_err(|e| e.context(&format!("error reading run {}", run_id)))?
                .ok_or_else(|| TfeError::Run(format!("run {} disappeared", run_id)))?;

            match run.run_status() {
                Some(status) if pending(&status) => {
                    self.log_queue_position(run_id, &status).await;
                }
                Some(_) => return Ok(run),
                None => warn!(
                    "Run {} has unrecognized status '{}', still waiting",
                    run_id,
                    run.status()
                ),
            }

            let delay = self.poll.delay(iteration);
            debug!(
                "Run {} is {}, polling again in {:?}",
                run_id,
                run.status(),
                delay
            );
            sleep(delay).await;
            iteration = iteration.saturating_add(1);
        }
    }

    async fn log_queue_position(&self, run_id: &str, status: &RunStatus) {
        match status {
            RunStatus::Pending => {
                match read_run_position_in_workspace_queue(self.client, run_id, self.workspace_id)
                    .await
                {
                    Ok(position) => info!(
                        "Run {} is pending, {} run(s) ahead in workspace {}",
                        run_id, position, self.workspace_id
                    ),
                    Err(e) => debug!("Could not read workspace queue: {}", e),
                }
            }
            RunStatus::PlanQueued | RunStatus::ApplyQueued => {
                let Some(org) = self.organization else {
                    return;
                };
                match read_run_position_in_org_queue(self.client, run_id, org).await {
                    Ok(position) => info!(
                        "Run {} is {}, position {} in organization {} queue",
                        run_id, status, position, org
                    ),
                    Err(e) => debug!("Could not read organization queue: {}", e),
                }
            }
            _ => {}
        }
    }
}

fn is_plan_pending(status: &RunStatus) -> bool {
    matches!(
        status,
        RunStatus::Pending
            | RunStatus::Fetching
            | RunStatus::FetchingCompleted
            | RunStatus::PrePlanRunning
            | RunStatus::PrePlanCompleted
            | RunStatus::Queuing
            | RunStatus::PlanQueued
            | RunStatus::Planning
            | RunStatus::CostEstimating
            | RunStatus::PolicyChecking
            | RunStatus::PostPlanRunning
    )
}

fn is_awaiting_confirmation(status: &RunStatus) -> bool {
    matches!(
        status,
        RunStatus::Planned
            | RunStatus::CostEstimated
            | RunStatus::PolicyChecked
            | RunStatus::PolicyOverride
            | RunStatus::PostPlanCompleted
            | RunStatus::PostPlanAwaitingDecision
    )
}

fn is_apply_pending(status: &RunStatus) -> bool {
    matches!(
        status,
        RunStatus::Confirmed
            | RunStatus::QueuingApply
            | RunStatus::PreApplyRunning
            | RunStatus::PreApplyCompleted
            | RunStatus::ApplyQueued
            | RunStatus::Applying
    )
}

fn run_message() -> String {
    format!(
        "{} on {}",
        run_config::MESSAGE_PREFIX,
        Utc::now().format("%a %b %e %H:%M:%S UTC %Y")
    )
}

fn placeholder_run_id() -> String {
    rand::random::<u64>().to_string()
}
