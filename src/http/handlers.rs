//! Axum handlers for the gateway endpoints.
//!
//! Each handler checks that the gateway can serve, parses query parameters,
//! calls one [`Gateway`] operation and shapes the JSON reply. An unconfigured
//! LIVE gateway answers 501 whatever the parameters; otherwise malformed
//! parameters become 400 JSON errors.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::gateway::{Gateway, GatewayError, GatewayResult};
use crate::jira::{PageRequest, ProjectQuery};
use crate::observability::metrics;

/// Default page size for list/search endpoints.
pub const DEFAULT_MAX_RESULTS: u32 = 25;
/// Default page size for grouped endpoints.
pub const DEFAULT_GROUPED_MAX_RESULTS: u32 = 50;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
}

/// `startAt`, `maxResults` and comma-separated `fields`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub start_at: Option<u32>,
    pub max_results: Option<u32>,
    pub fields: Option<String>,
}

impl PageParams {
    pub fn into_page(self, default_max_results: u32) -> PageRequest {
        PageRequest::new(
            self.start_at.unwrap_or(0),
            self.max_results.unwrap_or(default_max_results),
        )
        .with_fields(self.fields.as_deref().and_then(parse_fields))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectParams {
    pub query: Option<String>,
    pub start_at: Option<u32>,
    pub max_results: Option<u32>,
}

// Spelled out instead of flattening PageParams: serde_urlencoded cannot
// parse numbers through `#[serde(flatten)]`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub jql: Option<String>,
    pub start_at: Option<u32>,
    pub max_results: Option<u32>,
    pub fields: Option<String>,
}

/// Split a `fields` CSV, dropping blanks. `None` when nothing is left.
pub fn parse_fields(csv: &str) -> Option<Vec<String>> {
    let fields: Vec<String> = csv
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();
    (!fields.is_empty()).then_some(fields)
}

fn params<T>(query: Result<Query<T>, QueryRejection>) -> GatewayResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|e| GatewayError::validation(e.body_text()))
}

fn respond<T: Serialize>(
    operation: &'static str,
    gateway: &Gateway,
    start: Instant,
    result: GatewayResult<T>,
) -> Response {
    let response = match result {
        Ok(body) => Json(body).into_response(),
        Err(err) => {
            match &err {
                GatewayError::Upstream { source, .. } => tracing::warn!(
                    operation = operation,
                    upstream_status = ?source.status(),
                    error = %source,
                    "Upstream call failed"
                ),
                other => tracing::debug!(operation = operation, kind = other.kind(), error = %other, "Request rejected"),
            }
            err.into_response()
        }
    };
    metrics::record_request(operation, gateway.mode().as_str(), response.status().as_u16(), start);
    response
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "mode": state.gateway.mode(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn list_projects(
    State(state): State<AppState>,
    query: Result<Query<ProjectParams>, QueryRejection>,
) -> Response {
    let start = Instant::now();
    let result = async {
        state.gateway.ensure_available()?;
        let p = params(query)?;
        let query = ProjectQuery {
            query: p.query.filter(|q| !q.is_empty()),
            start_at: p.start_at.unwrap_or(0),
            max_results: p.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
        };
        state.gateway.list_projects(query).await
    }
    .await;
    respond("list_projects", &state.gateway, start, result)
}

pub async fn search_issues(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    let start = Instant::now();
    let result = async {
        state.gateway.ensure_available()?;
        let p = params(query)?;
        let page = PageParams {
            start_at: p.start_at,
            max_results: p.max_results,
            fields: p.fields,
        }
        .into_page(DEFAULT_MAX_RESULTS);
        state.gateway.search_issues(p.jql, page).await
    }
    .await;
    respond("search_issues", &state.gateway, start, result)
}

pub async fn my_issues(
    State(state): State<AppState>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Response {
    let start = Instant::now();
    let result = async {
        state.gateway.ensure_available()?;
        let page = params(query)?.into_page(DEFAULT_MAX_RESULTS);
        state.gateway.my_issues(page).await
    }
    .await;
    respond("my_issues", &state.gateway, start, result)
}

pub async fn my_issues_grouped(
    State(state): State<AppState>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Response {
    let start = Instant::now();
    let result = async {
        state.gateway.ensure_available()?;
        let page = params(query)?.into_page(DEFAULT_GROUPED_MAX_RESULTS);
        state.gateway.my_issues_grouped(page).await
    }
    .await;
    respond("my_issues_grouped", &state.gateway, start, result)
}

pub async fn project_issues_grouped(
    State(state): State<AppState>,
    Path(project_key): Path<String>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Response {
    let start = Instant::now();
    let result = async {
        state.gateway.ensure_available()?;
        let page = params(query)?.into_page(DEFAULT_GROUPED_MAX_RESULTS);
        state.gateway.project_issues_grouped(&project_key, page).await
    }
    .await;
    respond("project_issues_grouped", &state.gateway, start, result)
}
