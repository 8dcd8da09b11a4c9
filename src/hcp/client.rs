//! TFE HTTP client for API interactions

use futures::stream::{self, StreamExt};
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::traits::PaginatedResponse;

/// TFE API client
pub struct TfeClient {
    client: Client,
    token: String,
    host: String,
    /// Custom base URL override (for testing with mock servers)
    base_url_override: Option<String>,
    /// Organization used when a data source does not name one
    default_org: Option<String>,
}

impl TfeClient {
    /// Create a new TFE client with optimized connection settings
    pub fn new(token: String, host: String) -> Self {
        let client = Client::builder()
            // Connection pool settings - reuse connections
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            host,
            base_url_override: None,
            default_org: None,
        }
    }

    /// Create a client with custom base URL (for testing with mock servers)
    pub fn with_base_url(token: String, host: String, base_url: String) -> Self {
        let client = Client::builder().build().unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            host,
            base_url_override: Some(base_url),
            default_org: None,
        }
    }

    /// Set the organization used when none is given explicitly
    pub fn set_default_org(&mut self, org: Option<String>) {
        self.default_org = org;
    }

    /// Default organization, if configured
    pub fn default_org(&self) -> Option<&str> {
        self.default_org.as_deref()
    }

    /// Resolve org: explicit value wins, then the configured default
    pub fn effective_org(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .filter(|o| !o.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.default_org.clone())
    }

    /// Build the base URL for API requests
    pub(crate) fn base_url(&self) -> String {
        if let Some(ref url) = self.base_url_override {
            return url.clone();
        }
        format!(
            "https://{}/{}",
            self.host,
            api::BASE_PATH.trim_start_matches('/')
        )
    }

    /// Get the host the client talks to
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Add standard headers to a request builder
    fn with_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/vnd.api+json")
    }

    /// Create a GET request builder with standard headers
    pub(crate) fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.get(url))
    }

    /// Create a POST request builder with standard headers
    pub(crate) fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.post(url))
    }

    /// Parse an API response, returning error for non-success status codes
    pub(crate) async fn parse_api_response<T>(
        &self,
        response: reqwest::Response,
        error_context: &str,
    ) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        if !response.status().is_success() {
            return Err(TfeError::Api {
                status: response.status().as_u16(),
                message: format!("Failed to fetch {}", error_context),
            });
        }
        Ok(response.json().await?)
    }

    /// Fetch all pages from a paginated API endpoint with parallel fetching
    ///
    /// Page 1 is fetched first to learn `total-pages`, the remaining pages are
    /// fetched concurrently (at most `MAX_CONCURRENT_PAGE_REQUESTS` in flight)
    /// and stitched back together in page order.
    ///
    /// # Arguments
    /// * `path` - API path (e.g., "/workspaces/ws-123/vars" or with query "...?search[tags]=a")
    /// * `error_context` - Context for error messages (e.g., "variables for workspace 'ws-123'")
    pub async fn fetch_all_pages<T, R>(&self, path: &str, error_context: &str) -> Result<Vec<T>>
    where
        T: Send,
        R: DeserializeOwned + PaginatedResponse<T> + Send,
    {
        let separator = if path.contains('?') { "&" } else { "?" };

        let first_page_url = format!(
            "{}{}{}page[size]={}&page[number]=1",
            self.base_url(),
            path,
            separator,
            api::DEFAULT_PAGE_SIZE,
        );

        debug!("Fetching page 1 from: {}", first_page_url);

        let response = self.get(&first_page_url).send().await?;

        let first_resp: R = self.parse_api_response(response, error_context).await?;
        let meta = first_resp.meta().cloned();
        let mut all_items = first_resp.into_data();

        let (total_pages, total_count) = match meta.and_then(|m| m.pagination) {
            Some(p) => (p.total_pages, p.total_count),
            None => return Ok(all_items),
        };

        debug!("Page 1/{}, total items: {}", total_pages, total_count);

        if total_pages <= 1 {
            return Ok(all_items);
        }

        debug!(
            "Fetching {} remaining pages in parallel (max {} concurrent)",
            total_pages - 1,
            api::MAX_CONCURRENT_PAGE_REQUESTS
        );

        let page_futures = (2..=total_pages).map(|page_num| {
            let url = format!(
                "{}{}{}page[size]={}&page[number]={}",
                self.base_url(),
                path,
                separator,
                api::DEFAULT_PAGE_SIZE,
                page_num
            );
            self.fetch_single_page::<T, R>(url, page_num, error_context)
        });

        let results: Vec<Result<(u32, Vec<T>)>> = stream::iter(page_futures)
            .buffer_unordered(api::MAX_CONCURRENT_PAGE_REQUESTS)
            .collect()
            .await;

        let mut page_results = results.into_iter().collect::<Result<Vec<_>>>()?;
        page_results.sort_by_key(|(page_num, _)| *page_num);

        for (_, items) in page_results {
            all_items.extend(items);
        }

        debug!(
            "Fetched {} total items for {}",
            all_items.len(),
            error_context
        );
        Ok(all_items)
    }

    /// Fetch a single resource by API path
    ///
    /// Returns `None` for 404 and an error for any other non-success status.
    pub async fn fetch_resource_by_path<T>(
        &self,
        path: &str,
        resource_label: &str,
    ) -> Result<Option<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url(), path);
        debug!("Fetching {} from: {}", resource_label, url);

        let response = self.get(&url).send().await?;

        match response.status().as_u16() {
            200 => {
                let mut raw: serde_json::Value = response.json().await?;
                let item: T =
                    serde_json::from_value(raw["data"].take()).map_err(|e| TfeError::Api {
                        status: 200,
                        message: format!("Failed to parse {}: {}", resource_label, e),
                    })?;
                Ok(Some(item))
            }
            404 => Ok(None),
            status => Err(TfeError::Api {
                status,
                message: format!("Failed to fetch {}", resource_label),
            }),
        }
    }

    /// Fetch a single page (helper for parallel pagination)
    async fn fetch_single_page<T, R>(
        &self,
        url: String,
        page_num: u32,
        error_context: &str,
    ) -> Result<(u32, Vec<T>)>
    where
        R: DeserializeOwned + PaginatedResponse<T>,
    {
        debug!("Fetching page {} from: {}", page_num, url);

        let response = self.get(&url).send().await?;

        let page_context = format!("{} (page {})", error_context, page_num);
        let resp: R = self.parse_api_response(response, &page_context).await?;
        let items = resp.into_data();

        debug!("Page {} returned {} items", page_num, items.len());
        Ok((page_num, items))
    }
}

#[cfg(test)]
impl TfeClient {
    /// Create a test client with mock base URL
    pub fn test_client(base_url: &str) -> Self {
        Self::with_base_url(
            "test-token".to_string(),
            "mock.terraform.io".to_string(),
            base_url.to_string(),
        )
    }
}


#[cfg(test)]
mod pagination_tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::hcp::traits::ApiListResponse;

    #[derive(Deserialize, Debug, Clone)]
    struct TestItem {
        id: String,
    }

    type TestItemsResponse = ApiListResponse<TestItem>;

    fn page(ids: &[&str], current: u32, total_pages: u32, total_count: u32) -> serde_json::Value {
        serde_json::json!({
            "data": ids.iter().map(|id| serde_json::json!({"id": id})).collect::<Vec<_>>(),
            "meta": {
                "pagination": {
                    "current-page": current,
                    "total-pages": total_pages,
                    "total-count": total_count
                }
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_all_pages_single_page_sends_auth() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/test-items"))
            .and(query_param("page[number]", "1"))
            .and(query_param("page[size]", "100"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(&["a", "b"], 1, 1, 2)))
            .mount(&mock_server)
            .await;

        let items = client
            .fetch_all_pages::<TestItem, TestItemsResponse>("/test-items", "test items")
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "a");
    }

    #[tokio::test]
    async fn test_fetch_all_pages_keeps_page_order() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        for (num, ids) in [(1, ["i1", "i2"]), (2, ["i3", "i4"]), (3, ["i5", "i6"])] {
            Mock::given(method("GET"))
                .and(path("/test-items"))
                .and(query_param("page[number]", num.to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_json(page(&ids, num, 3, 6)))
                .mount(&mock_server)
                .await;
        }

        let items = client
            .fetch_all_pages::<TestItem, TestItemsResponse>("/test-items", "test items")
            .await
            .unwrap();

        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["i1", "i2", "i3", "i4", "i5", "i6"]);
    }

    #[tokio::test]
    async fn test_fetch_all_pages_no_pagination_meta() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/test-items"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"data": [{"id": "only"}]})),
            )
            .mount(&mock_server)
            .await;

        let items = client
            .fetch_all_pages::<TestItem, TestItemsResponse>("/test-items", "test items")
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_pages_error_on_subsequent_page() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/test-items"))
            .and(query_param("page[number]", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(&["i1"], 1, 2, 2)))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/test-items"))
            .and(query_param("page[number]", "2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let result = client
            .fetch_all_pages::<TestItem, TestItemsResponse>("/test-items", "test items")
            .await;

        match result.unwrap_err() {
            TfeError::Api { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("page 2"));
            }
            _ => panic!("Expected TfeError::Api"),
        }
    }

    #[tokio::test]
    async fn test_fetch_all_pages_with_existing_query_params() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/test-items"))
            .and(query_param("search[tags]", "prod"))
            .and(query_param("page[number]", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(&["tagged"], 1, 1, 1)))
            .mount(&mock_server)
            .await;

        let items = client
            .fetch_all_pages::<TestItem, TestItemsResponse>(
                "/test-items?search[tags]=prod",
                "test items",
            )
            .await
            .unwrap();
        assert_eq!(items[0].id, "tagged");
    }

    #[tokio::test]
    async fn test_fetch_resource_by_path_not_found_is_none() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/things/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let result = client
            .fetch_resource_by_path::<TestItem>("/things/missing", "thing 'missing'")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_fetch_resource_by_path_returns_data() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/things/one"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "id": "one" }
            })))
            .mount(&mock_server)
            .await;

        let item = client
            .fetch_resource_by_path::<TestItem>("/things/one", "thing 'one'")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(item.id, "one");
    }
}
