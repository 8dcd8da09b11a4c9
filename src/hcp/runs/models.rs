//! Run data models

use serde::Deserialize;

use crate::hcp::traits::TfeResource;
use crate::hcp::workspaces::RelationshipData;

/// Individual run statuses for explicit filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Pending,
    Fetching,
    FetchingCompleted,
    PrePlanRunning,
    PrePlanCompleted,
    Queuing,
    PlanQueued,
    Planning,
    Planned,
    CostEstimating,
    CostEstimated,
    PolicyChecking,
    PolicyOverride,
    PolicySoftFailed,
    PolicyChecked,
    Confirmed,
    PostPlanRunning,
    PostPlanCompleted,
    PostPlanAwaitingDecision,
    PlannedAndFinished,
    PlannedAndSaved,
    QueuingApply,
    PreApplyRunning,
    PreApplyCompleted,
    ApplyQueued,
    Applying,
    Applied,
    Discarded,
    Errored,
    Canceled,
    ForceCanceled,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunStatus::Pending => "pending",
            RunStatus::Fetching => "fetching",
            RunStatus::FetchingCompleted => "fetching_completed",
            RunStatus::PrePlanRunning => "pre_plan_running",
            RunStatus::PrePlanCompleted => "pre_plan_completed",
            RunStatus::Queuing => "queuing",
            RunStatus::PlanQueued => "plan_queued",
            RunStatus::Planning => "planning",
            RunStatus::Planned => "planned",
            RunStatus::CostEstimating => "cost_estimating",
            RunStatus::CostEstimated => "cost_estimated",
            RunStatus::PolicyChecking => "policy_checking",
            RunStatus::PolicyOverride => "policy_override",
            RunStatus::PolicySoftFailed => "policy_soft_failed",
            RunStatus::PolicyChecked => "policy_checked",
            RunStatus::Confirmed => "confirmed",
            RunStatus::PostPlanRunning => "post_plan_running",
            RunStatus::PostPlanCompleted => "post_plan_completed",
            RunStatus::PostPlanAwaitingDecision => "post_plan_awaiting_decision",
            RunStatus::PlannedAndFinished => "planned_and_finished",
            RunStatus::PlannedAndSaved => "planned_and_saved",
            RunStatus::QueuingApply => "queuing_apply",
            RunStatus::PreApplyRunning => "pre_apply_running",
            RunStatus::PreApplyCompleted => "pre_apply_completed",
            RunStatus::ApplyQueued => "apply_queued",
            RunStatus::Applying => "applying",
            RunStatus::Applied => "applied",
            RunStatus::Discarded => "discarded",
            RunStatus::Errored => "errored",
            RunStatus::Canceled => "canceled",
            RunStatus::ForceCanceled => "force_canceled",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RunStatus::Pending),
            "fetching" => Ok(RunStatus::Fetching),
            "fetching_completed" => Ok(RunStatus::FetchingCompleted),
            "pre_plan_running" => Ok(RunStatus::PrePlanRunning),
            "pre_plan_completed" => Ok(RunStatus::PrePlanCompleted),
            "queuing" => Ok(RunStatus::Queuing),
            "plan_queued" => Ok(RunStatus::PlanQueued),
            "planning" => Ok(RunStatus::Planning),
            "planned" => Ok(RunStatus::Planned),
            "cost_estimating" => Ok(RunStatus::CostEstimating),
            "cost_estimated" => Ok(RunStatus::CostEstimated),
            "policy_checking" => Ok(RunStatus::PolicyChecking),
            "policy_override" => Ok(RunStatus::PolicyOverride),
            "policy_soft_failed" => Ok(RunStatus::PolicySoftFailed),
            "policy_checked" => Ok(RunStatus::PolicyChecked),
            "confirmed" => Ok(RunStatus::Confirmed),
            "post_plan_running" => Ok(RunStatus::PostPlanRunning),
            "post_plan_completed" => Ok(RunStatus::PostPlanCompleted),
            "post_plan_awaiting_decision" => Ok(RunStatus::PostPlanAwaitingDecision),
            "planned_and_finished" => Ok(RunStatus::PlannedAndFinished),
            "planned_and_saved" => Ok(RunStatus::PlannedAndSaved),
            "queuing_apply" => Ok(RunStatus::QueuingApply),
            "pre_apply_running" => Ok(RunStatus::PreApplyRunning),
            "pre_apply_completed" => Ok(RunStatus::PreApplyCompleted),
            "apply_queued" => Ok(RunStatus::ApplyQueued),
            "applying" => Ok(RunStatus::Applying),
            "applied" => Ok(RunStatus::Applied),
            "discarded" => Ok(RunStatus::Discarded),
            "errored" => Ok(RunStatus::Errored),
            "canceled" => Ok(RunStatus::Canceled),
            "force_canceled" => Ok(RunStatus::ForceCanceled),
            _ => Err(format!("Unknown run status: {}", s)),
        }
    }
}

impl RunStatus {
    /// Check if this is a non-final (active) status
    ///
    /// Non-final statuses are runs that are still in progress and not yet completed.
    /// Final statuses are: applied, discarded, errored, canceled, force_canceled,
    /// planned_and_finished, planned_and_saved
    pub fn is_non_final(&self) -> bool {
        !matches!(
            self,
            RunStatus::Applied
                | RunStatus::Discarded
                | RunStatus::Errored
                | RunStatus::Canceled
                | RunStatus::ForceCanceled
                | RunStatus::PlannedAndFinished
                | RunStatus::PlannedAndSaved
        )
    }
}

/// Query options for listing runs
#[derive(Default, Clone)]
pub struct RunQuery {
    /// Filter by status group: "non_final", "final", "discardable"
    pub status_group: Option<String>,
    /// Filter by specific statuses (comma-separated in API)
    pub statuses: Option<Vec<RunStatus>>,
    /// Page number to start from
    pub page: Option<u32>,
    /// Page size for pagination
    pub page_size: Option<u32>,
}

impl RunQuery {
    /// Create a new query with the non_final status group
    pub fn non_final() -> Self {
        Self {
            status_group: Some("non_final".to_string()),
            ..Default::default()
        }
    }
}

/// Options for creating a run
#[derive(Debug, Clone)]
pub struct RunCreateOptions {
    pub workspace_id: String,
    pub is_destroy: bool,
    pub message: String,
    pub auto_apply: bool,
}

/// Response wrapper for runs list
#[derive(Deserialize, Debug)]
pub struct RunsResponse {
    pub data: Vec<Run>,
    #[serde(default)]
    pub meta: Option<RunPaginationMeta>,
}

/// Pagination metadata for runs
#[derive(Deserialize, Debug, Default)]
pub struct RunPaginationMeta {
    pub pagination: Option<RunPagination>,
}

/// Pagination details for runs
#[derive(Deserialize, Debug)]
pub struct RunPagination {
    #[serde(rename = "current-page")]
    pub current_page: u32,
    #[serde(rename = "next-page")]
    pub next_page: Option<u32>,
    #[serde(rename = "prev-page")]
    pub prev_page: Option<u32>,
    #[serde(rename = "page-size")]
    pub page_size: Option<u32>,
    #[serde(rename = "total-count")]
    pub total_count: Option<u32>,
    #[serde(rename = "total-pages")]
    pub total_pages: Option<u32>,
}

/// Run data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Run {
    pub id: String,
    pub attributes: RunAttributes,
    pub relationships: Option<RunRelationships>,
}

/// Run attributes from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct RunAttributes {
    pub status: String,
    pub message: Option<String>,
    #[serde(rename = "has-changes")]
    pub has_changes: Option<bool>,
    #[serde(rename = "is-destroy")]
    pub is_destroy: Option<bool>,
    #[serde(rename = "auto-apply")]
    pub auto_apply: Option<bool>,
    /// Only present on runs returned by the organization run queue
    #[serde(rename = "position-in-queue")]
    pub position_in_queue: Option<u32>,
    pub actions: Option<RunActions>,
}

/// Run action flags
#[derive(Deserialize, Debug, Clone)]
pub struct RunActions {
    #[serde(rename = "is-cancelable")]
    pub is_cancelable: Option<bool>,
    #[serde(rename = "is-confirmable")]
    pub is_confirmable: Option<bool>,
    #[serde(rename = "is-discardable")]
    pub is_discardable: Option<bool>,
}

/// Run relationships from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct RunRelationships {
    pub workspace: Option<RelationshipData>,
}

impl TfeResource for Run {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.id
    }
}

impl Run {
    /// Raw status string
    pub fn status(&self) -> &str {
        &self.attributes.status
    }

    /// Parsed status, `None` for statuses this client does not know
    pub fn run_status(&self) -> Option<RunStatus> {
        self.attributes.status.parse().ok()
    }

    pub fn has_changes(&self) -> bool {
        self.attributes.has_changes.unwrap_or(false)
    }

    pub fn is_destroy(&self) -> bool {
        self.attributes.is_destroy.unwrap_or(false)
    }

    pub fn auto_apply(&self) -> bool {
        self.attributes.auto_apply.unwrap_or(false)
    }

    /// Position in the organization run queue, 0 when absent
    pub fn position_in_queue(&self) -> u32 {
        self.attributes.position_in_queue.unwrap_or(0)
    }

    /// Get workspace ID from relationships
    pub fn workspace_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.workspace.as_ref())
            .and_then(|w| w.data.as_ref())
            .map(|d| d.id.as_str())
    }

    /// Check if run can be confirmed (applied)
    pub fn is_confirmable(&self) -> bool {
        self.attributes
            .actions
            .as_ref()
            .and_then(|a| a.is_confirmable)
            .unwrap_or(false)
    }
}
