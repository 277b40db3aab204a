//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() → flag latched → every wait() resolves (even late ones) → server drains and exits
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger()
//! ```
//!
//! # Design Decisions
//! - One watch channel so tests can stop a server without OS signals
//! - In-flight upstream calls are not cancelled; they finish or time out

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
