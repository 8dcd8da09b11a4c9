//! Variable API operations

use crate::config::api;
use crate::error::Result;
use crate::hcp::traits::ApiListResponse;
use crate::hcp::TfeClient;

use super::models::Variable;

impl TfeClient {
    /// List all variables defined on a workspace
    pub async fn list_workspace_variables(&self, workspace_id: &str) -> Result<Vec<Variable>> {
        let path = format!("/{}/{}/{}", api::WORKSPACES, workspace_id, api::VARS);
        let error_context = format!("variables for workspace '{}'", workspace_id);

        self.fetch_all_pages::<Variable, ApiListResponse<Variable>>(&path, &error_context)
            .await
    }

    /// List all variables belonging to a variable set
    pub async fn list_variable_set_variables(&self, variable_set_id: &str) -> Result<Vec<Variable>> {
        let path = format!(
            "/{}/{}/relationships/{}",
            api::VARSETS,
            variable_set_id,
            api::VARS
        );
        let error_context = format!("variables for variable set '{}'", variable_set_id);

        self.fetch_all_pages::<Variable, ApiListResponse<Variable>>(&path, &error_context)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn var_json(id: &str, key: &str, category: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "type": "vars",
            "attributes": {
                "key": key,
                "value": "v",
                "sensitive": false,
                "category": category,
                "hcl": false
            }
        })
    }

    #[tokio::test]
    async fn test_list_workspace_variables_all_pages() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/workspaces/ws-1/vars"))
            .and(query_param("page[number]", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [var_json("var-1", "a", "terraform")],
                "meta": {"pagination": {"current-page": 1, "total-pages": 2, "total-count": 2}}
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/workspaces/ws-1/vars"))
            .and(query_param("page[number]", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [var_json("var-2", "B", "env")],
                "meta": {"pagination": {"current-page": 2, "total-pages": 2, "total-count": 2}}
            })))
            .mount(&mock_server)
            .await;

        let vars = client.list_workspace_variables("ws-1").await.unwrap();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars[0].id, "var-1");
        assert_eq!(vars[1].id, "var-2");
    }

    #[tokio::test]
    async fn test_list_variable_set_variables() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/varsets/varset-1/relationships/vars"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [var_json("var-9", "region", "terraform")]
            })))
            .mount(&mock_server)
            .await;

        let vars = client.list_variable_set_variables("varset-1").await.unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].attributes.key, "region");
    }

    #[tokio::test]
    async fn test_list_workspace_variables_not_found() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/workspaces/ws-missing/vars"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        match client.list_workspace_variables("ws-missing").await.unwrap_err() {
            TfeError::Api { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("ws-missing"));
            }
            _ => panic!("Expected TfeError::Api"),
        }
    }
}
