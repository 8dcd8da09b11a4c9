//! Run API operations

use log::debug;

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::traits::ApiListResponse;
use crate::hcp::TfeClient;

use super::models::{Run, RunCreateOptions, RunQuery, RunsResponse};

impl TfeClient {
    /// Get runs for a workspace with optional filters, newest first
    ///
    /// Uses API query parameters for server-side filtering:
    /// - `filter[status_group]` for status group filtering (non_final, final, discardable)
    /// - `filter[status]` for specific status filtering
    ///
    /// Follows `next-page` until the API stops returning one.
    pub async fn get_runs_for_workspace(
        &self,
        workspace_id: &str,
        query: RunQuery,
    ) -> Result<Vec<Run>> {
        let mut all_runs = Vec::new();
        let mut page = query.page.unwrap_or(1);
        let page_size = query.page_size.unwrap_or(api::DEFAULT_PAGE_SIZE);

        loop {
            let mut url = format!(
                "{}/{}/{}/{}?page[size]={}&page[number]={}",
                self.base_url(),
                api::WORKSPACES,
                workspace_id,
                api::RUNS,
                page_size,
                page
            );
            append_run_query_params(&mut url, &query);

            debug!("Fetching runs page {} from: {}", page, url);

            let response = self.get(&url).send().await?;

            if !response.status().is_success() {
                return Err(TfeError::Api {
                    status: response.status().as_u16(),
                    message: format!("Failed to fetch runs for workspace '{}'", workspace_id),
                });
            }

            let runs_response: RunsResponse = response.json().await?;
            let run_count = runs_response.data.len();
            all_runs.extend(runs_response.data);

            let next_page = runs_response
                .meta
                .and_then(|m| m.pagination)
                .and_then(|p| {
                    debug!(
                        "Page {}/{:?}, fetched {} runs",
                        p.current_page, p.total_pages, run_count
                    );
                    p.next_page
                });

            match next_page {
                Some(next) if run_count > 0 => page = next,
                _ => break,
            }
        }

        debug!(
            "Fetched {} runs for workspace '{}'",
            all_runs.len(),
            workspace_id
        );
        Ok(all_runs)
    }

    /// Get the run queue of an organization
    ///
    /// Each returned run carries its `position-in-queue`.
    pub async fn get_organization_run_queue(&self, org: &str) -> Result<Vec<Run>> {
        let path = format!("/{}/{}/{}/queue", api::ORGANIZATIONS, org, api::RUNS);
        let error_context = format!("run queue for organization '{}'", org);

        self.fetch_all_pages::<Run, ApiListResponse<Run>>(&path, &error_context)
            .await
    }

    /// Get a single run by ID
    pub async fn get_run_by_id(&self, run_id: &str) -> Result<Option<Run>> {
        let path = format!("/{}/{}", api::RUNS, run_id);
        self.fetch_resource_by_path::<Run>(&path, &format!("run '{}'", run_id))
            .await
    }

    /// Create a run on a workspace
    ///
    /// Sends POST /runs with a JSON:API body referencing the workspace.
    pub async fn create_run(&self, options: &RunCreateOptions) -> Result<Run> {
        let url = format!("{}/{}", self.base_url(), api::RUNS);

        debug!(
            "Creating {} run for workspace {}",
            if options.is_destroy { "destroy" } else { "apply" },
            options.workspace_id
        );

        let body = serde_json::json!({
            "data": {
                "type": "runs",
                "attributes": {
                    "is-destroy": options.is_destroy,
                    "message": options.message,
                    "auto-apply": options.auto_apply
                },
                "relationships": {
                    "workspace": {
                        "data": {
                            "type": "workspaces",
                            "id": options.workspace_id
                        }
                    }
                }
            }
        });

        let response = self.post(&url).json(&body).send().await?;

        match response.status().as_u16() {
            200 | 201 => {
                let raw: serde_json::Value = response.json().await?;
                let run: Run =
                    serde_json::from_value(raw["data"].clone()).map_err(|e| TfeError::Api {
                        status: 201,
                        message: format!("Failed to parse run response: {}", e),
                    })?;
                Ok(run)
            }
            404 => Err(TfeError::Api {
                status: 404,
                message: format!("Workspace '{}' not found", options.workspace_id),
            }),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(TfeError::Api {
                    status,
                    message: format!(
                        "Failed to create run for workspace '{}': {}",
                        options.workspace_id, body
                    ),
                })
            }
        }
    }

    /// Confirm a run that is waiting for confirmation
    ///
    /// Sends POST /runs/:run_id/actions/apply
    /// The run must have is-confirmable: true in its actions.
    pub async fn apply_run(&self, run_id: &str, comment: &str) -> Result<()> {
        let url = format!("{}/{}/{}/actions/apply", self.base_url(), api::RUNS, run_id);

        debug!("Applying run: {}", run_id);

        let body = serde_json::json!({ "comment": comment });
        let response = self.post(&url).json(&body).send().await?;

        match response.status().as_u16() {
            200 | 202 => Ok(()),
            409 => Err(TfeError::Api {
                status: 409,
                message: format!("Run '{}' is not confirmable", run_id),
            }),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(TfeError::Api {
                    status,
                    message: format!("Failed to apply run '{}': {}", run_id, body),
                })
            }
        }
    }
}

/// Append run query parameters to URL
fn append_run_query_params(url: &mut String, query: &RunQuery) {
    if let Some(status_group) = &query.status_group {
        url.push_str(&format!("&filter[status_group]={}", status_group));
    }

    if let Some(statuses) = &query.statuses {
        if !statuses.is_empty() {
            url.push_str(&format!(
                "&filter[status]={}",
                statuses
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hcp::runs::RunStatus;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn run_json(id: &str, status: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "type": "runs",
            "attributes": {
                "status": status,
                "has-changes": true,
                "is-destroy": false,
                "actions": {"is-confirmable": status == "planned"}
            },
            "relationships": {
                "workspace": {"data": {"id": "ws-1", "type": "workspaces"}}
            }
        })
    }

    #[test]
    fn test_append_run_query_params() {
        let mut url = "https://x/api/v2/workspaces/ws-1/runs?page[size]=100".to_string();
        let query = RunQuery {
            status_group: Some("non_final".to_string()),
            statuses: Some(vec![RunStatus::Pending, RunStatus::PlanQueued]),
            ..Default::default()
        };
        append_run_query_params(&mut url, &query);
        assert!(url.ends_with("&filter[status_group]=non_final&filter[status]=pending,plan_queued"));
    }

    #[tokio::test]
    async fn test_get_runs_for_workspace_follows_next_page() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/workspaces/ws-1/runs"))
            .and(query_param("page[number]", "1"))
            .and(query_param("filter[status_group]", "non_final"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [run_json("run-03", "pending")],
                "meta": {"pagination": {"current-page": 1, "next-page": 2, "total-pages": 2}}
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/workspaces/ws-1/runs"))
            .and(query_param("page[number]", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [run_json("run-02", "pending"), run_json("run-01", "planning")],
                "meta": {"pagination": {"current-page": 2, "next-page": null, "total-pages": 2}}
            })))
            .mount(&mock_server)
            .await;

        let runs = client
            .get_runs_for_workspace("ws-1", RunQuery::non_final())
            .await
            .unwrap();

        let ids: Vec<&str> = runs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["run-03", "run-02", "run-01"]);
    }

    #[tokio::test]
    async fn test_get_runs_for_workspace_api_error() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/workspaces/ws-1/runs"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        match client
            .get_runs_for_workspace("ws-1", RunQuery::default())
            .await
            .unwrap_err()
        {
            TfeError::Api { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("ws-1"));
            }
            _ => panic!("Expected TfeError::Api"),
        }
    }

    #[tokio::test]
    async fn test_get_organization_run_queue() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations/my-org/runs/queue"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"id": "run-01", "attributes": {"status": "plan_queued", "position-in-queue": 0}},
                    {"id": "run-02", "attributes": {"status": "plan_queued", "position-in-queue": 1}}
                ],
                "meta": {"pagination": {"current-page": 1, "total-pages": 1, "total-count": 2}}
            })))
            .mount(&mock_server)
            .await;

        let queue = client.get_organization_run_queue("my-org").await.unwrap();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue[1].position_in_queue(), 1);
    }

    #[tokio::test]
    async fn test_get_run_by_id_not_found() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/runs/run-missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        assert!(client.get_run_by_id("run-missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_run_sends_json_api_body() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/runs"))
            .and(body_partial_json(serde_json::json!({
                "data": {
                    "type": "runs",
                    "attributes": {"is-destroy": true, "auto-apply": false},
                    "relationships": {"workspace": {"data": {"id": "ws-1"}}}
                }
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"data": run_json("run-new", "pending")})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let run = client
            .create_run(&RunCreateOptions {
                workspace_id: "ws-1".to_string(),
                is_destroy: true,
                message: "test".to_string(),
                auto_apply: false,
            })
            .await
            .unwrap();

        assert_eq!(run.id, "run-new");
        assert_eq!(run.run_status(), Some(RunStatus::Pending));
    }

    #[tokio::test]
    async fn test_create_run_unprocessable() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/runs"))
            .respond_with(ResponseTemplate::new(422).set_body_string("workspace is locked"))
            .mount(&mock_server)
            .await;

        let err = client
            .create_run(&RunCreateOptions {
                workspace_id: "ws-1".to_string(),
                is_destroy: false,
                message: "test".to_string(),
                auto_apply: true,
            })
            .await
            .unwrap_err();

        match err {
            TfeError::Api { status, message } => {
                assert_eq!(status, 422);
                assert!(message.contains("workspace is locked"));
            }
            _ => panic!("Expected TfeError::Api"),
        }
    }

    #[tokio::test]
    async fn test_apply_run_success() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/runs/run-1/actions/apply"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&mock_server)
            .await;

        assert!(client.apply_run("run-1", "confirmed").await.is_ok());
    }

    #[tokio::test]
    async fn test_apply_run_not_confirmable() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/runs/run-1/actions/apply"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&mock_server)
            .await;

        match client.apply_run("run-1", "confirmed").await.unwrap_err() {
            TfeError::Api { status, .. } => assert_eq!(status, 409),
            _ => panic!("Expected TfeError::Api"),
        }
    }
}
