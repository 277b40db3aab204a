//! Gateway operations.
//!
//! # Request State Machine
//! ```text
//! ModeDecided ─┬─ MOCK ───────────────→ fixtures ─┐
//!              ├─ LIVE (configured) ──→ provider ─┼→ Normalized → [Classified] → Shaped
//!              └─ LIVE (incomplete) ──→ NotConfigured (no I/O)
//! ```

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::config::{GatewayConfig, JiraConfig};
use crate::gateway::error::{GatewayError, GatewayResult};
use crate::gateway::mode::Mode;
use crate::jira::classify::{group_issues, IssueGroups};
use crate::jira::client::{IssueProvider, JiraClient};
use crate::jira::fixtures;
use crate::jira::normalize::{normalize_base_url, normalize_issue_page, normalize_project_page};
use crate::jira::types::{
    IssuePage, IssueSearch, JiraError, JiraResult, PageRequest, ProjectPage, ProjectQuery,
    PROVIDER_NAME,
};

/// Fields requested by the grouped operations unless the caller picks its own.
pub const GROUPED_FIELDS: [&str; 4] = ["summary", "status", "issuetype", "updated"];

/// Response body of the grouped operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedIssues {
    pub groups: IssueGroups,
    pub total: u64,
}

enum Source<'a> {
    Fixtures,
    Live(&'a dyn IssueProvider),
}

/// Issue-tracker gateway shared by all request handlers.
pub struct Gateway {
    mode: Mode,
    jira: JiraConfig,
    provider: Option<Arc<dyn IssueProvider>>,
}

impl Gateway {
    /// Build the gateway, creating a [`JiraClient`] when LIVE and configured.
    pub fn from_config(config: &GatewayConfig) -> JiraResult<Self> {
        let mode = Mode::select(config);
        let provider = match mode {
            Mode::Live if config.jira.is_configured() => {
                Some(Arc::new(JiraClient::new(&config.jira)?) as Arc<dyn IssueProvider>)
            }
            _ => None,
        };
        Ok(Self {
            mode,
            jira: config.jira.clone(),
            provider,
        })
    }

    /// Build the gateway around an explicit provider.
    pub fn with_provider(config: &GatewayConfig, provider: Arc<dyn IssueProvider>) -> Self {
        Self {
            mode: Mode::select(config),
            jira: config.jira.clone(),
            provider: Some(provider),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Fail with `NotConfigured` when a LIVE gateway cannot reach its provider.
    ///
    /// Handlers call this before parsing parameters so the answer does not
    /// depend on the request.
    pub fn ensure_available(&self) -> GatewayResult<()> {
        self.source().map(|_| ())
    }

    fn source(&self) -> GatewayResult<Source<'_>> {
        match self.mode {
            Mode::Mock => Ok(Source::Fixtures),
            Mode::Live => {
                let not_configured = GatewayError::NotConfigured { provider: PROVIDER_NAME };
                if !self.jira.is_configured() {
                    return Err(not_configured);
                }
                match self.provider.as_deref() {
                    Some(provider) => Ok(Source::Live(provider)),
                    None => Err(not_configured),
                }
            }
        }
    }

    fn link_base(&self) -> &str {
        normalize_base_url(self.jira.link_base())
    }

    /// Projects visible to the caller. Fixtures ignore query and paging.
    pub async fn list_projects(&self, query: ProjectQuery) -> GatewayResult<ProjectPage> {
        let raw = match self.source()? {
            Source::Fixtures => fixtures::projects(),
            Source::Live(provider) => upstream(provider.find_projects(&query).await)?,
        };
        Ok(normalize_project_page(&raw, self.link_base(), &query))
    }

    /// JQL search. `jql` is required in LIVE mode; fixtures ignore it.
    pub async fn search_issues(&self, jql: Option<String>, page: PageRequest) -> GatewayResult<IssuePage> {
        let raw = match self.source()? {
            Source::Fixtures => fixtures::my_issues(),
            Source::Live(provider) => {
                let jql = jql
                    .filter(|j| !j.trim().is_empty())
                    .ok_or_else(|| GatewayError::validation("Missing jql"))?;
                upstream(provider.search_issues(&IssueSearch::new(jql, page.clone())).await)?
            }
        };
        Ok(normalize_issue_page(&raw, self.link_base(), &page))
    }

    /// Unresolved issues assigned to the caller.
    pub async fn my_issues(&self, page: PageRequest) -> GatewayResult<IssuePage> {
        let raw = match self.source()? {
            Source::Fixtures => fixtures::my_issues(),
            Source::Live(provider) => upstream(provider.my_issues(&page).await)?,
        };
        Ok(normalize_issue_page(&raw, self.link_base(), &page))
    }

    /// The caller's issues grouped into workflow buckets.
    pub async fn my_issues_grouped(&self, page: PageRequest) -> GatewayResult<GroupedIssues> {
        let page = self.my_issues(with_grouped_fields(page)).await?;
        Ok(GroupedIssues {
            total: page.total,
            groups: group_issues(page.issues),
        })
    }

    /// One project's issues assigned to the caller, grouped.
    ///
    /// `total` counts the issues actually classified.
    pub async fn project_issues_grouped(
        &self,
        project_key: &str,
        page: PageRequest,
    ) -> GatewayResult<GroupedIssues> {
        let page = with_grouped_fields(page);

        let issues = match self.source()? {
            Source::Fixtures => {
                let key = project_key.trim().to_ascii_uppercase();
                let mut issues = normalize_issue_page(&fixtures::my_issues(), self.link_base(), &page).issues;
                issues.retain(|issue| belongs_to_project(&issue.key, &key));
                issues
            }
            Source::Live(provider) => {
                let key = normalize_project_key(project_key)?;
                let raw = upstream(provider.search_issues(&IssueSearch::project_mine(&key, page.clone())).await)?;
                normalize_issue_page(&raw, self.link_base(), &page).issues
            }
        };

        let groups = group_issues(issues);
        Ok(GroupedIssues {
            total: groups.len() as u64,
            groups,
        })
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("mode", &self.mode)
            .field("jira", &self.jira)
            .field("has_provider", &self.provider.is_some())
            .finish()
    }
}

fn upstream(result: JiraResult<Value>) -> GatewayResult<Value> {
    result.map_err(|source: JiraError| GatewayError::Upstream {
        provider: PROVIDER_NAME,
        source,
    })
}

fn with_grouped_fields(page: PageRequest) -> PageRequest {
    if page.fields.is_some() {
        return page;
    }
    let fields = GROUPED_FIELDS.iter().map(|f| f.to_string()).collect();
    page.with_fields(Some(fields))
}

/// Upper-case a project key and reject anything that is not a plain Jira key.
pub fn normalize_project_key(raw: &str) -> GatewayResult<String> {
    let key = raw.trim().to_ascii_uppercase();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(GatewayError::validation(format!("Invalid project key '{}'", raw)));
    }
    Ok(key)
}

/// Exact project match on the part of the issue key before the separator.
fn belongs_to_project(issue_key: &str, project_key: &str) -> bool {
    issue_key
        .split_once('-')
        .map(|(prefix, _)| prefix.eq_ignore_ascii_case(project_key))
        .unwrap_or(false)
}
