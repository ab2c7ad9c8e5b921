//! Request bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

// ============================================================================
// Projects and tasks
// ============================================================================

/// Body for creating or updating a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProjectRequest {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description: description.filter(|d| !d.trim().is_empty()),
        }
    }
}

/// Body for creating or updating a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: NaiveDate,
}

impl TaskRequest {
    pub fn new(title: impl Into<String>, description: Option<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: description.filter(|d| !d.trim().is_empty()),
            due_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_uses_camel_case() {
        let request = RegisterRequest {
            email: "a@b.c".to_string(),
            password: "secret1".to_string(),
            full_name: "Ada".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["fullName"], "Ada");
    }

    #[test]
    fn test_task_request_shape() {
        let due = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let json = serde_json::to_value(TaskRequest::new("Write docs", None, due)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "Write docs", "dueDate": "2024-02-15"})
        );
    }

    #[test]
    fn test_blank_description_is_dropped() {
        let request = ProjectRequest::new("Website", Some("  ".to_string()));
        assert_eq!(request.description, None);
    }
}
