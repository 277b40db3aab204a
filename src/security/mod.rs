//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing response:
//!     → headers.rs (add hardening headers the handler did not set)
//! ```
//!
//! # Design Decisions
//! - Headers are added only when absent so handlers can override them
//! - CORS lives with the router because it depends on listener config

pub mod headers;
