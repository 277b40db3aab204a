//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Link base used when no Jira base URL is configured.
pub const DEFAULT_JIRA_BASE_URL: &str = "https://your-domain.atlassian.net";

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Answer every integration request from fixtures instead of the provider.
    pub mock_mode: bool,

    /// CORS settings for the dashboard UI.
    pub cors: CorsConfig,

    /// Jira provider settings.
    pub jira: JiraConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            mock_mode: true,
            cors: CorsConfig::default(),
            jira: JiraConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port.
    pub port: u16,
}

impl ListenerConfig {
    /// Bind address in `host:port` form.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

/// Cross-origin settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origin allowed to call the API with credentials.
    pub origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:5173".to_string(),
        }
    }
}

/// Jira provider configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JiraConfig {
    /// Site root, e.g. "https://acme.atlassian.net".
    pub base_url: Option<String>,

    /// Account email used as the Basic auth identity.
    pub email: Option<String>,

    /// API token used as the Basic auth secret.
    pub api_token: Option<String>,

    /// Per-request deadline for upstream calls in seconds.
    pub timeout_secs: u64,
}

impl JiraConfig {
    /// Both a base URL and a credential are present.
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.api_token.is_some()
    }

    /// Identity and secret, when both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.email, &self.api_token) {
            (Some(email), Some(token)) => Some((email.as_str(), token.as_str())),
            _ => None,
        }
    }

    /// Base URL used to build browse/project links.
    pub fn link_base(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_JIRA_BASE_URL)
    }
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            email: None,
            api_token: None,
            timeout_secs: 15,
        }
    }
}

// Keeps the API token out of logs.
impl std::fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Pretty text or JSON lines.
    pub log_format: LogFormat,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_boot_in_mock_mode() {
        let config = GatewayConfig::default();
        assert!(config.mock_mode);
        assert!(!config.jira.is_configured());
        assert_eq!(config.listener.bind_address(), "0.0.0.0:3001");
        assert_eq!(config.jira.timeout_secs, 15);
    }

    #[test]
    fn test_is_configured_needs_base_url_and_token() {
        let mut jira = JiraConfig {
            base_url: Some("https://acme.atlassian.net".into()),
            ..JiraConfig::default()
        };
        assert!(!jira.is_configured());

        jira.api_token = Some("token".into());
        assert!(jira.is_configured());
        // Identity is optional for the configured check.
        assert!(jira.credentials().is_none());

        jira.email = Some("me@acme.io".into());
        assert_eq!(jira.credentials(), Some(("me@acme.io", "token")));
    }

    #[test]
    fn test_link_base_falls_back() {
        let jira = JiraConfig::default();
        assert_eq!(jira.link_base(), DEFAULT_JIRA_BASE_URL);
    }

    #[test]
    fn test_debug_redacts_token() {
        let jira = JiraConfig {
            api_token: Some("super-secret".into()),
            ..JiraConfig::default()
        };
        let rendered = format!("{:?}", jira);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            mock_mode = false

            [jira]
            base_url = "https://acme.atlassian.net"
            "#,
        )
        .unwrap();
        assert!(!config.mock_mode);
        assert_eq!(config.jira.base_url.as_deref(), Some("https://acme.atlassian.net"));
        assert_eq!(config.jira.timeout_secs, 15);
        assert_eq!(config.listener.port, 3001);
    }
}
