//! Canned provider payloads for mock mode.
//!
//! Shaped like real Jira responses so they go through the same normalizer
//! as live data.

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

/// Raw `project/search` payload.
pub fn projects() -> Value {
    json!({
        "self": "http://mock/jira/project/search",
        "nextPage": null,
        "maxResults": 50,
        "startAt": 0,
        "total": 3,
        "values": [
            { "id": "10001", "key": "PLAT", "name": "Platform" },
            { "id": "10002", "key": "IDP", "name": "Internal Developer Platform" },
            { "id": "10003", "key": "OBS", "name": "Observability" },
        ],
    })
}

/// Raw search payload for the caller's own issues.
pub fn my_issues() -> Value {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    json!({
        "expand": "schema,names",
        "startAt": 0,
        "maxResults": 25,
        "total": 5,
        "issues": [
            issue("20001", "IDP-101", "Implement backend mock mode", "In Progress", "indeterminate", "Task", &now),
            issue("20002", "IDP-102", "Wire Jira view to backend", "To Do", "new", "Story", &now),
            issue("20003", "IDP-103", "Unblock deployment pipeline", "Blocked", "indeterminate", "Bug", &now),
            issue("20004", "IDP-104", "Migrate docs to Confluence", "Resolved", "done", "Task", &now),
            issue("20005", "IDP-105", "Clean up old branches", "Closed", "done", "Task", &now),
        ],
    })
}

fn issue(
    id: &str,
    key: &str,
    summary: &str,
    status: &str,
    category: &str,
    issue_type: &str,
    updated: &str,
) -> Value {
    let category_name = match category {
        "new" => "To Do",
        "indeterminate" => "In Progress",
        _ => "Done",
    };
    json!({
        "id": id,
        "key": key,
        "fields": {
            "summary": summary,
            "status": {
                "name": status,
                "statusCategory": { "key": category, "name": category_name },
            },
            "issuetype": { "name": issue_type },
            "updated": updated,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jira::classify::{group_issues, WorkflowBucket};
    use crate::jira::normalize::normalize_issues;

    #[test]
    fn test_fixture_totals_match_items() {
        let projects = projects();
        assert_eq!(projects["values"].as_array().unwrap().len() as u64, projects["total"]);

        let issues = my_issues();
        assert_eq!(issues["issues"].as_array().unwrap().len() as u64, issues["total"]);
    }

    #[test]
    fn test_fixtures_cover_every_bucket() {
        let groups = group_issues(normalize_issues(&my_issues(), "https://x"));
        for bucket in WorkflowBucket::ALL {
            assert_eq!(groups.bucket(bucket).len(), 1, "bucket {}", bucket);
        }
    }

    #[test]
    fn test_updated_is_rfc3339() {
        let issues = my_issues();
        let updated = issues["issues"][0]["fields"]["updated"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(updated).is_ok());
    }
}
