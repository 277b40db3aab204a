//! Jira integration subsystem.
//!
//! # Data Flow
//! ```text
//! LIVE:  client.rs (REST call, clamp, auth) ─┐
//!                                           ├→ normalize.rs (canonical Project/Issue, links)
//! MOCK:  fixtures.rs (canned payloads) ─────┘        → classify.rs (workflow buckets)
//! ```
//!
//! # Design Decisions
//! - Raw payloads stay `serde_json::Value` until normalization so missing
//!   fields degrade to defaults instead of failing deserialization
//! - Links (`webUrl`, `projectUrl`, `boardUrl`) are always computed, never trusted from upstream
//! - Classification is a pure function shared by every grouped endpoint

pub mod classify;
pub mod client;
pub mod fixtures;
pub mod normalize;
pub mod types;

pub use classify::{classify, group_issues, IssueGroups, WorkflowBucket};
pub use client::{IssueProvider, JiraClient};
pub use types::{
    Issue, IssuePage, IssueSearch, JiraError, JiraResult, PageRequest, Project, ProjectPage,
    ProjectQuery, PROVIDER_NAME,
};
