//! Jira REST client with a fixed deadline and pass-through error handling.
//!
//! # Responsibilities
//! - Bind to the configured site root and credential
//! - Issue project searches and JQL issue searches
//! - Clamp `maxResults` to the provider ceiling
//! - Surface non-2xx answers with their status and raw body
//!
//! # Design Decisions
//! - No retries; callers own retry policy
//! - Timeouts and connection failures carry no status code
//! - Missing credentials send the request unauthenticated and let the provider reject it

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::Value;

use crate::config::JiraConfig;
use crate::jira::normalize::normalize_base_url;
use crate::jira::types::{IssueSearch, JiraError, JiraResult, PageRequest, ProjectQuery};
use crate::observability::metrics;

/// Source of raw provider payloads.
///
/// Real implementation: [`JiraClient`]. Tests substitute spies.
#[async_trait]
pub trait IssueProvider: Send + Sync {
    /// Raw `project/search` payload.
    async fn find_projects(&self, query: &ProjectQuery) -> JiraResult<Value>;

    /// Raw JQL `search` payload.
    async fn search_issues(&self, search: &IssueSearch) -> JiraResult<Value>;

    /// Unresolved issues assigned to the authenticated user.
    async fn my_issues(&self, page: &PageRequest) -> JiraResult<Value> {
        self.search_issues(&IssueSearch::mine(page.clone())).await
    }
}

/// HTTP client for Jira Cloud's REST API v3.
#[derive(Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    api_root: String,
    credentials: Option<(String, String)>,
    timeout: Duration,
}

impl JiraClient {
    /// Create a client from provider configuration.
    ///
    /// Fails only if the underlying HTTP client cannot be built.
    pub fn new(config: &JiraConfig) -> JiraResult<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .user_agent(concat!("idp-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base = normalize_base_url(config.base_url.as_deref().unwrap_or_default());

        Ok(Self {
            http,
            api_root: format!("{}/rest/api/3", base),
            credentials: config
                .credentials()
                .map(|(email, token)| (email.to_string(), token.to_string())),
            timeout,
        })
    }

    /// REST root every request is issued against.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Whether requests carry Basic credentials.
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    async fn get_json(&self, endpoint: &'static str, params: &[(&str, String)]) -> JiraResult<Value> {
        let start = Instant::now();
        let mut request = self
            .http
            .get(format!("{}{}", self.api_root, endpoint))
            .query(params);
        if let Some((email, token)) = &self.credentials {
            request = request.basic_auth(email, Some(token));
        }

        let result = self.send(request).await;

        let outcome = match &result {
            Ok(_) => "ok".to_string(),
            Err(JiraError::Status { status, .. }) => status.to_string(),
            Err(JiraError::Transport(_)) => "transport".to_string(),
            Err(JiraError::InvalidBody(_)) => "invalid_body".to_string(),
        };
        metrics::record_upstream(endpoint, outcome, start);

        if let Err(e) = &result {
            tracing::warn!(
                endpoint = endpoint,
                status = ?e.status(),
                timeout_secs = self.timeout.as_secs(),
                error = %e,
                "Jira request failed"
            );
        }
        result
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> JiraResult<Value> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(JiraError::Status {
                status: status.as_u16(),
                details: parse_error_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| JiraError::InvalidBody(e.to_string()))
    }
}

#[async_trait]
impl IssueProvider for JiraClient {
    async fn find_projects(&self, query: &ProjectQuery) -> JiraResult<Value> {
        let mut params = vec![
            ("startAt", query.start_at.to_string()),
            ("maxResults", query.max_results.to_string()),
        ];
        if let Some(q) = &query.query {
            params.push(("query", q.clone()));
        }
        self.get_json("/project/search", &params).await
    }

    async fn search_issues(&self, search: &IssueSearch) -> JiraResult<Value> {
        let mut params = vec![
            ("jql", search.jql.clone()),
            ("startAt", search.page.start_at.to_string()),
            ("maxResults", search.effective_max_results().to_string()),
        ];
        if let Some(fields) = &search.page.fields {
            params.push(("fields", fields.join(",")));
        }
        self.get_json("/search", &params).await
    }
}

impl std::fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraClient")
            .field("api_root", &self.api_root)
            .field("authenticated", &self.credentials.is_some())
            .field("timeout_secs", &self.timeout.as_secs())
            .finish()
    }
}

/// Upstream error bodies are JSON when Jira produced them, text otherwise.
fn parse_error_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JiraConfig {
        JiraConfig {
            base_url: Some("https://acme.atlassian.net/".to_string()),
            email: Some("dev@acme.io".to_string()),
            api_token: Some("token".to_string()),
            timeout_secs: 15,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = JiraClient::new(&test_config()).unwrap();
        assert_eq!(client.api_root(), "https://acme.atlassian.net/rest/api/3");
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_missing_identity_is_unauthenticated() {
        let mut config = test_config();
        config.email = None;
        let client = JiraClient::new(&config).unwrap();
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_parse_error_body() {
        assert!(parse_error_body("").is_null());
        assert_eq!(parse_error_body("Bad gateway"), Value::String("Bad gateway".into()));
        assert_eq!(
            parse_error_body(r#"{"errorMessages":["x"]}"#)["errorMessages"][0],
            "x"
        );
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_transport_error() {
        let mut config = test_config();
        // Port 9 (discard) is closed on loopback.
        config.base_url = Some("http://127.0.0.1:9".to_string());
        config.timeout_secs = 2;
        let client = JiraClient::new(&config).unwrap();

        let err = client
            .find_projects(&ProjectQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, JiraError::Transport(_)));
        assert_eq!(err.status(), None);
    }
}
