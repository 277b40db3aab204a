//! Error → HTTP response mapping.
//!
//! # Status Mapping
//! - NotConfigured → 501 `{"error": "Jira not configured"}`
//! - Validation → 400 `{"error": <message>}`
//! - Upstream → provider status (500 when absent) `{"error": "Jira API error", "details": ...}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::gateway::GatewayError;

/// HTTP status for a gateway error.
pub fn status_for(err: &GatewayError) -> StatusCode {
    match err {
        GatewayError::NotConfigured { .. } => StatusCode::NOT_IMPLEMENTED,
        GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
        GatewayError::Upstream { source, .. } => source
            .status()
            .and_then(|s| StatusCode::from_u16(s).ok())
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        let body = match &self {
            GatewayError::Upstream { source, .. } => json!({
                "error": self.to_string(),
                "details": source.details(),
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
