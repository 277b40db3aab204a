//! Developer-platform dashboard backend.
//!
//! Serves the dashboard UI's JSON API. The core is an issue-tracker gateway
//! that answers from fixtures in mock mode or from Jira in live mode, with
//! one canonical response shape either way.

pub mod config;
pub mod gateway;
pub mod http;
pub mod jira;
pub mod lifecycle;
pub mod observability;
pub mod plan;
pub mod security;

pub use config::schema::GatewayConfig;
pub use gateway::Gateway;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
