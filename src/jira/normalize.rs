//! Raw payload → canonical shape.
//!
//! Fixture data and live responses pass through the same functions, so
//! handlers cannot tell which source produced a value. Every accessor is
//! total: a missing or mistyped field becomes an empty string or zero.

use serde_json::Value;

use crate::jira::types::{
    Issue, IssuePage, PageRequest, Project, ProjectPage, ProjectQuery, MAX_RESULTS_CEILING,
};

/// Strip trailing slashes. Idempotent.
pub fn normalize_base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

pub fn project_url(base_url: &str, key: &str) -> String {
    format!("{}/jira/projects/{}/summary", normalize_base_url(base_url), key)
}

pub fn board_url(base_url: &str, key: &str) -> String {
    format!(
        "{}/jira/software/c/projects/{}/boards",
        normalize_base_url(base_url),
        key
    )
}

pub fn issue_web_url(base_url: &str, key: &str) -> String {
    format!("{}/browse/{}", normalize_base_url(base_url), key)
}

/// Map a raw project-search payload's `values` into canonical projects.
pub fn normalize_projects(raw: &Value, base_url: &str) -> Vec<Project> {
    items(raw, "values")
        .iter()
        .map(|p| {
            let key = text(p.get("key"));
            Project {
                id: text(p.get("id")),
                name: text(p.get("name")),
                project_url: project_url(base_url, &key),
                board_url: board_url(base_url, &key),
                key,
            }
        })
        .collect()
}

/// Map a raw search payload's `issues` into canonical issues.
pub fn normalize_issues(raw: &Value, base_url: &str) -> Vec<Issue> {
    items(raw, "issues")
        .iter()
        .map(|i| {
            let key = text(i.get("key"));
            Issue {
                id: text(i.get("id")),
                summary: text(i.pointer("/fields/summary")),
                status_name: text(i.pointer("/fields/status/name")),
                status_category_key: text(i.pointer("/fields/status/statusCategory/key")),
                issue_type: text(i.pointer("/fields/issuetype/name")),
                updated: text(i.pointer("/fields/updated")),
                web_url: issue_web_url(base_url, &key),
                key,
            }
        })
        .collect()
}

/// Full project envelope; paging falls back to the request when absent.
pub fn normalize_project_page(raw: &Value, base_url: &str, request: &ProjectQuery) -> ProjectPage {
    let values = normalize_projects(raw, base_url);
    ProjectPage {
        self_url: text(raw.get("self")),
        start_at: number(raw.get("startAt")).unwrap_or(u64::from(request.start_at)),
        max_results: number(raw.get("maxResults")).unwrap_or(u64::from(request.max_results)),
        total: number(raw.get("total")).unwrap_or(values.len() as u64),
        values,
    }
}

/// Full issue envelope; paging falls back to the request when absent.
///
/// The `maxResults` fallback is the clamped value actually sent upstream.
pub fn normalize_issue_page(raw: &Value, base_url: &str, request: &PageRequest) -> IssuePage {
    let issues = normalize_issues(raw, base_url);
    let sent_max_results = request.max_results.min(MAX_RESULTS_CEILING);
    IssuePage {
        start_at: number(raw.get("startAt")).unwrap_or(u64::from(request.start_at)),
        max_results: number(raw.get("maxResults")).unwrap_or(u64::from(sent_max_results)),
        total: number(raw.get("total")).unwrap_or(issues.len() as u64),
        issues,
    }
}

fn items<'a>(raw: &'a Value, field: &str) -> &'a [Value] {
    raw.get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn number(value: Option<&Value>) -> Option<u64> {
    value.and_then(Value::as_u64)
}
