//! Provider-facing types and error definitions.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Display name used in error bodies ("Jira not configured").
pub const PROVIDER_NAME: &str = "Jira";

/// Upper bound the provider accepts for `maxResults`.
pub const MAX_RESULTS_CEILING: u32 = 100;

/// JQL behind the "my issues" operation.
pub const MY_ISSUES_JQL: &str =
    "assignee = currentUser() AND resolution = Unresolved ORDER BY updated DESC";

/// Errors that can occur talking to the provider.
#[derive(Debug, Error)]
pub enum JiraError {
    /// Provider answered with a non-2xx status.
    #[error("Jira returned HTTP {status}")]
    Status { status: u16, details: Value },

    /// Connection failure or timeout; no status is available.
    #[error("Jira request failed: {0}")]
    Transport(String),

    /// A 2xx response whose body is not JSON.
    #[error("Jira returned an unreadable body: {0}")]
    InvalidBody(String),
}

impl JiraError {
    /// Upstream HTTP status, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            JiraError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw upstream error body, or `null`.
    pub fn details(&self) -> Value {
        match self {
            JiraError::Status { details, .. } => details.clone(),
            _ => Value::Null,
        }
    }
}

impl From<reqwest::Error> for JiraError {
    fn from(err: reqwest::Error) -> Self {
        JiraError::Transport(err.to_string())
    }
}

/// Result type for provider operations.
pub type JiraResult<T> = Result<T, JiraError>;

/// Parameters for the project search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectQuery {
    pub query: Option<String>,
    pub start_at: u32,
    pub max_results: u32,
}

impl Default for ProjectQuery {
    fn default() -> Self {
        Self {
            query: None,
            start_at: 0,
            max_results: 25,
        }
    }
}

/// Paging and field selection shared by the issue operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub start_at: u32,
    pub max_results: u32,
    pub fields: Option<Vec<String>>,
}

impl PageRequest {
    pub fn new(start_at: u32, max_results: u32) -> Self {
        Self {
            start_at,
            max_results,
            fields: None,
        }
    }

    pub fn with_fields(mut self, fields: Option<Vec<String>>) -> Self {
        self.fields = fields;
        self
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 25)
    }
}

/// A JQL search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueSearch {
    pub jql: String,
    pub page: PageRequest,
}

impl IssueSearch {
    pub fn new(jql: impl Into<String>, page: PageRequest) -> Self {
        Self {
            jql: jql.into(),
            page,
        }
    }

    /// The fixed "assigned to me, unresolved" search.
    pub fn mine(page: PageRequest) -> Self {
        Self::new(MY_ISSUES_JQL, page)
    }

    /// Issues of one project assigned to the caller.
    pub fn project_mine(project_key: &str, page: PageRequest) -> Self {
        Self::new(
            format!(
                "project = {} AND assignee = currentUser() ORDER BY updated DESC",
                project_key
            ),
            page,
        )
    }

    /// `maxResults` actually sent upstream.
    pub fn effective_max_results(&self) -> u32 {
        self.page.max_results.min(MAX_RESULTS_CEILING)
    }
}

/// Canonical project shape served to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub key: String,
    pub name: String,
    pub project_url: String,
    pub board_url: String,
}

/// Canonical issue shape served to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub key: String,
    pub summary: String,
    pub status_name: String,
    pub status_category_key: String,
    pub issue_type: String,
    pub updated: String,
    pub web_url: String,
}

/// Envelope for `GET /projects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPage {
    #[serde(rename = "self")]
    pub self_url: String,
    pub start_at: u64,
    pub max_results: u64,
    pub total: u64,
    pub values: Vec<Project>,
}

/// Envelope for the issue search endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePage {
    pub start_at: u64,
    pub max_results: u64,
    pub total: u64,
    pub issues: Vec<Issue>,
}
