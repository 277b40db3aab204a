//! Issue-tracker gateway.
//!
//! # Data Flow
//! ```text
//! handler
//!     → mode.rs (MOCK or LIVE from the global flag)
//!     → service.rs (fixtures or provider call, normalize, classify)
//!     → error.rs (NotConfigured / Validation / Upstream)
//! ```
//!
//! # Design Decisions
//! - The credential check runs before any network I/O
//! - No fallback from LIVE to MOCK and no retries
//! - The gateway is built once from immutable config and injected via axum state

pub mod error;
pub mod mode;
pub mod service;

pub use error::{GatewayError, GatewayResult};
pub use mode::Mode;
pub use service::{Gateway, GroupedIssues, GROUPED_FIELDS};
