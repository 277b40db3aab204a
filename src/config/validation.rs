//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the Jira base URL and listener/metrics addresses
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("jira.base_url '{value}' is not a valid URL: {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("jira.base_url '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("listener address '{0}' is not a valid socket address")]
    InvalidListener(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("cors.origin '{0}' is not a valid header value")]
    InvalidCorsOrigin(String),

    #[error("observability.metrics_address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Check the whole configuration, collecting every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(base_url) = &config.jira.base_url {
        match Url::parse(base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(_) => errors.push(ValidationError::UnsupportedScheme(base_url.clone())),
            Err(e) => errors.push(ValidationError::InvalidBaseUrl {
                value: base_url.clone(),
                reason: e.to_string(),
            }),
        }
    }

    // Hostnames such as "localhost" are resolved at bind time.
    let bind = config.listener.bind_address();
    let host = config.listener.host.trim();
    if bind.parse::<SocketAddr>().is_err() && (host.is_empty() || host.contains(char::is_whitespace)) {
        errors.push(ValidationError::InvalidListener(bind));
    }

    if config.jira.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("jira.timeout_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if HeaderValue::from_str(&config.cors.origin).is_err() {
        errors.push(ValidationError::InvalidCorsOrigin(config.cors.origin.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
