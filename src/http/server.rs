//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers under `/api`
//! - Wire up middleware (CORS, request ID, trace, timeout, security headers)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method, Request},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{CorsConfig, GatewayConfig};
use crate::gateway::Gateway;
use crate::http::handlers::{self, AppState};
use crate::http::request::{self, X_REQUEST_ID};
use crate::jira::JiraResult;
use crate::lifecycle::Shutdown;
use crate::plan;
use crate::security;

/// HTTP server for the dashboard backend.
pub struct HttpServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl HttpServer {
    /// Create a server, building the gateway from configuration.
    pub fn new(config: GatewayConfig) -> JiraResult<Self> {
        let gateway = Gateway::from_config(&config)?;
        Ok(Self::with_gateway(config, gateway))
    }

    /// Create a server around an already-built gateway.
    pub fn with_gateway(config: GatewayConfig, gateway: Gateway) -> Self {
        let state = AppState {
            gateway: Arc::new(gateway),
        };
        let router = build_router(&config, state);
        Self {
            router,
            config: Arc::new(config),
        }
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` is triggered.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &GatewayConfig, state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/plan/tasks", get(plan::list_tasks))
        .route("/jira/projects", get(handlers::list_projects))
        .route("/jira/issues/search", get(handlers::search_issues))
        .route("/jira/issues/mine", get(handlers::my_issues))
        .route("/jira/issues/mine/grouped", get(handlers::my_issues_grouped))
        .route(
            "/jira/projects/{project_key}/issues/grouped",
            get(handlers::project_issues_grouped),
        );

    let router = Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                path = %req.uri().path(),
                request_id = %request::request_id(req),
            )
        }))
        .layer(
            ServiceBuilder::new()
                .layer(request::set_request_id_layer())
                .layer(request::propagate_request_id_layer()),
        )
        .layer(cors_layer(&config.cors));

    security::headers::apply(router)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = match HeaderValue::from_str(&config.origin) {
        Ok(value) => AllowOrigin::exact(value),
        Err(_) => {
            tracing::warn!(origin = %config.origin, "Invalid CORS origin, cross-origin requests disabled");
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([HeaderName::from_static(X_REQUEST_ID)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn mock_server() -> HttpServer {
        HttpServer::new(GatewayConfig::default()).unwrap()
    }

    fn live_unconfigured_server() -> HttpServer {
        let config = GatewayConfig {
            mock_mode: false,
            ..GatewayConfig::default()
        };
        HttpServer::new(config).unwrap()
    }

    async fn fetch(router: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, body)
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, headers, body) = fetch(mock_server().router(), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["mode"], "mock");
        assert!(headers.contains_key(X_REQUEST_ID));
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let request = Request::builder()
            .uri("/api/health")
            .header(X_REQUEST_ID, "req-42")
            .body(Body::empty())
            .unwrap();
        let response = mock_server().router().oneshot(request).await.unwrap();
        assert_eq!(response.headers()[X_REQUEST_ID], "req-42");
    }

    #[tokio::test]
    async fn test_mock_projects() {
        let (status, _, body) = fetch(mock_server().router(), "/api/jira/projects?query=zzz&startAt=7").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["self"], "http://mock/jira/project/search");
        assert_eq!(body["total"], 3);
        assert_eq!(body["values"].as_array().unwrap().len(), 3);
        assert_eq!(
            body["values"][0]["boardUrl"],
            "https://your-domain.atlassian.net/jira/software/c/projects/PLAT/boards"
        );
    }

    #[tokio::test]
    async fn test_mock_search_without_jql() {
        let (status, _, body) = fetch(mock_server().router(), "/api/jira/issues/search").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["issues"].as_array().unwrap().len(), 5);
        assert_eq!(
            body["issues"][0]["webUrl"],
            "https://your-domain.atlassian.net/browse/IDP-101"
        );
    }

    #[tokio::test]
    async fn test_mock_grouped() {
        let (status, _, body) = fetch(mock_server().router(), "/api/jira/issues/mine/grouped").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 5);
        for bucket in ["open", "inprogress", "blocked", "completed", "closed"] {
            assert_eq!(body["groups"][bucket].as_array().unwrap().len(), 1, "{}", bucket);
        }
        assert_eq!(body["groups"]["blocked"][0]["key"], "IDP-103");
        assert_eq!(body["groups"]["closed"][0]["key"], "IDP-105");
    }

    #[tokio::test]
    async fn test_mock_project_grouped() {
        let (status, _, body) = fetch(mock_server().router(), "/api/jira/projects/idp/issues/grouped").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 5);

        let (status, _, body) = fetch(mock_server().router(), "/api/jira/projects/OBS/issues/grouped").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
        assert!(body["groups"]["open"].as_array().unwrap().is_empty());
    }

    fn live_configured_server() -> HttpServer {
        let mut config = GatewayConfig::default();
        config.mock_mode = false;
        config.jira.base_url = Some("http://127.0.0.1:9".into());
        config.jira.email = Some("dev@acme.io".into());
        config.jira.api_token = Some("token".into());
        HttpServer::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_project_key() {
        let (status, _, body) =
            fetch(live_configured_server().router(), "/api/jira/projects/I%20D/issues/grouped").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Invalid project key"));
    }

    #[tokio::test]
    async fn test_mock_odd_project_key_is_empty_group() {
        for uri in [
            "/api/jira/projects/ID-P/issues/grouped",
            "/api/jira/projects/I%20D/issues/grouped",
        ] {
            let (status, _, body) = fetch(mock_server().router(), uri).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(body["total"], 0, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_live_unconfigured_ignores_bad_input() {
        for uri in [
            "/api/jira/projects/I%20D/issues/grouped",
            "/api/jira/projects/ID-P/issues/grouped",
            "/api/jira/issues/mine?startAt=abc",
            "/api/jira/issues/search",
            "/api/jira/projects?maxResults=-1",
        ] {
            let (status, _, body) = fetch(live_unconfigured_server().router(), uri).await;
            assert_eq!(status, StatusCode::NOT_IMPLEMENTED, "{}", uri);
            assert_eq!(body, serde_json::json!({ "error": "Jira not configured" }));
        }
    }

    #[tokio::test]
    async fn test_malformed_paging_is_json_400() {
        let (status, _, body) = fetch(mock_server().router(), "/api/jira/issues/mine?startAt=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_live_unconfigured_returns_501() {
        for uri in [
            "/api/jira/projects",
            "/api/jira/issues/search?jql=project%3DIDP",
            "/api/jira/issues/mine",
            "/api/jira/issues/mine/grouped",
            "/api/jira/projects/IDP/issues/grouped",
        ] {
            let (status, _, body) = fetch(live_unconfigured_server().router(), uri).await;
            assert_eq!(status, StatusCode::NOT_IMPLEMENTED, "{}", uri);
            assert_eq!(body, serde_json::json!({ "error": "Jira not configured" }));
        }
    }

    #[tokio::test]
    async fn test_plan_tasks() {
        let (status, _, body) = fetch(mock_server().router(), "/api/plan/tasks").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tasks"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/jira/projects")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();
        let response = mock_server().router().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, _, _) = fetch(mock_server().router(), "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
