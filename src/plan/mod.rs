//! Planning board tasks.
//!
//! There is no live planning backend; both modes serve the same fixtures.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanStatus {
    Backlog,
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "In Review")]
    InReview,
    Done,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTask {
    pub key: &'static str,
    pub summary: &'static str,
    pub status: PlanStatus,
    pub assignee: &'static str,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<&'static str>,
    pub labels: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct PlanTasks {
    pub tasks: Vec<PlanTask>,
}

/// Fixture tasks shown on the planning board.
pub fn mock_tasks() -> Vec<PlanTask> {
    vec![
        PlanTask {
            key: "PLAN-101",
            summary: "Create onboarding flow for new services",
            status: PlanStatus::InProgress,
            assignee: "soorya",
            priority: Priority::High,
            due_date: Some("2025-08-25"),
            labels: vec!["services", "onboarding"],
        },
        PlanTask {
            key: "PLAN-102",
            summary: "Add health checks to API Gateway routes",
            status: PlanStatus::ToDo,
            assignee: "akilesh",
            priority: Priority::Medium,
            due_date: Some("2025-08-28"),
            labels: vec!["api", "gateway"],
        },
        PlanTask {
            key: "PLAN-103",
            summary: "Implement blue/green deploy strategy for payments",
            status: PlanStatus::InReview,
            assignee: "devopsteam",
            priority: Priority::High,
            due_date: Some("2025-08-30"),
            labels: vec!["deploy", "strategy"],
        },
        PlanTask {
            key: "PLAN-104",
            summary: "Mobile app log forwarding to central store",
            status: PlanStatus::Backlog,
            assignee: "mobile",
            priority: Priority::Low,
            due_date: None,
            labels: vec!["mobile", "logging"],
        },
        PlanTask {
            key: "PLAN-105",
            summary: "Add SLO dashboards for staging",
            status: PlanStatus::Blocked,
            assignee: "test",
            priority: Priority::Critical,
            due_date: None,
            labels: vec!["observability", "slo"],
        },
        PlanTask {
            key: "PLAN-106",
            summary: "Migrate DB migrations to timestamped files",
            status: PlanStatus::Done,
            assignee: "devopsteam",
            priority: Priority::Medium,
            due_date: None,
            labels: vec!["database", "migrations"],
        },
    ]
}

pub async fn list_tasks() -> Json<PlanTasks> {
    Json(PlanTasks { tasks: mock_tasks() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_serialization() {
        let json = serde_json::to_value(PlanTasks { tasks: mock_tasks() }).unwrap();
        let tasks = json["tasks"].as_array().unwrap();
        assert_eq!(tasks.len(), 6);
        assert_eq!(tasks[0]["status"], "In Progress");
        assert_eq!(tasks[0]["dueDate"], "2025-08-25");
        assert!(tasks[3].get("dueDate").is_none());
        assert_eq!(tasks[4]["priority"], "Critical");
    }
}
