//! Status → workflow bucket classification.
//!
//! # Decision Order
//! ```text
//! status name contains "block"     → blocked   (any category)
//! category "new"                   → open
//! category "indeterminate"         → inprogress
//! category "done" + name "closed"  → closed
//! category "done"                  → completed
//! anything else                    → open
//! ```
//!
//! Matching is case-insensitive. Both grouped endpoints share [`group_issues`].

use serde::Serialize;

use crate::jira::types::Issue;

/// UI-facing workflow group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowBucket {
    Open,
    InProgress,
    Blocked,
    Completed,
    Closed,
}

impl WorkflowBucket {
    pub const ALL: [WorkflowBucket; 5] = [
        WorkflowBucket::Open,
        WorkflowBucket::InProgress,
        WorkflowBucket::Blocked,
        WorkflowBucket::Completed,
        WorkflowBucket::Closed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowBucket::Open => "open",
            WorkflowBucket::InProgress => "inprogress",
            WorkflowBucket::Blocked => "blocked",
            WorkflowBucket::Completed => "completed",
            WorkflowBucket::Closed => "closed",
        }
    }
}

impl std::fmt::Display for WorkflowBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a status name and status-category key into one bucket.
pub fn classify(status_name: &str, status_category_key: &str) -> WorkflowBucket {
    let name = status_name.to_lowercase();
    let category = status_category_key.to_lowercase();

    if name.contains("block") {
        return WorkflowBucket::Blocked;
    }
    match category.as_str() {
        "new" => WorkflowBucket::Open,
        "indeterminate" => WorkflowBucket::InProgress,
        "done" if name.contains("closed") => WorkflowBucket::Closed,
        "done" => WorkflowBucket::Completed,
        _ => WorkflowBucket::Open,
    }
}

/// Issues partitioned by bucket, input order kept within each bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueGroups {
    pub open: Vec<Issue>,
    pub inprogress: Vec<Issue>,
    pub blocked: Vec<Issue>,
    pub completed: Vec<Issue>,
    pub closed: Vec<Issue>,
}

impl IssueGroups {
    pub fn push(&mut self, bucket: WorkflowBucket, issue: Issue) {
        self.bucket_mut(bucket).push(issue);
    }

    pub fn bucket(&self, bucket: WorkflowBucket) -> &[Issue] {
        match bucket {
            WorkflowBucket::Open => &self.open,
            WorkflowBucket::InProgress => &self.inprogress,
            WorkflowBucket::Blocked => &self.blocked,
            WorkflowBucket::Completed => &self.completed,
            WorkflowBucket::Closed => &self.closed,
        }
    }

    fn bucket_mut(&mut self, bucket: WorkflowBucket) -> &mut Vec<Issue> {
        match bucket {
            WorkflowBucket::Open => &mut self.open,
            WorkflowBucket::InProgress => &mut self.inprogress,
            WorkflowBucket::Blocked => &mut self.blocked,
            WorkflowBucket::Completed => &mut self.completed,
            WorkflowBucket::Closed => &mut self.closed,
        }
    }

    /// Number of issues across all buckets.
    pub fn len(&self) -> usize {
        WorkflowBucket::ALL.iter().map(|b| self.bucket(*b).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stable partition of `issues` into buckets.
pub fn group_issues(issues: impl IntoIterator<Item = Issue>) -> IssueGroups {
    let mut groups = IssueGroups::default();
    for issue in issues {
        let bucket = classify(&issue.status_name, &issue.status_category_key);
        groups.push(bucket, issue);
    }
    groups
}
