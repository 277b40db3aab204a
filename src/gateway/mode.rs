//! Mock/live source selection.

use serde::Serialize;

use crate::config::GatewayConfig;

/// Where a request's data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Mock,
    Live,
}

impl Mode {
    /// The global mock flag wins regardless of credential completeness.
    pub fn select(config: &GatewayConfig) -> Mode {
        if config.mock_mode {
            Mode::Mock
        } else {
            Mode::Live
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Mock => "mock",
            Mode::Live => "live",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
