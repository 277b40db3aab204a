//! Gateway error taxonomy.

use thiserror::Error;

use crate::jira::JiraError;

/// Every way a gateway operation can fail.
///
/// Missing upstream fields are not errors; the normalizer substitutes defaults.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// LIVE mode without a base URL and credential.
    #[error("{provider} not configured")]
    NotConfigured { provider: &'static str },

    /// A required or malformed request parameter.
    #[error("{0}")]
    Validation(String),

    /// The provider failed or answered non-2xx.
    #[error("{provider} API error")]
    Upstream {
        provider: &'static str,
        #[source]
        source: JiraError,
    },
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        GatewayError::Validation(message.into())
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::NotConfigured { .. } => "not_configured",
            GatewayError::Validation(_) => "validation",
            GatewayError::Upstream { .. } => "upstream",
        }
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GatewayError::NotConfigured { provider: "Jira" };
        assert_eq!(err.to_string(), "Jira not configured");

        let err = GatewayError::Upstream {
            provider: "Jira",
            source: JiraError::Transport("timeout".into()),
        };
        assert_eq!(err.to_string(), "Jira API error");
        assert_eq!(err.kind(), "upstream");

        assert_eq!(GatewayError::validation("Missing jql").to_string(), "Missing jql");
    }
}
