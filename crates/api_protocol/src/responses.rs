//! Response bodies and their conversion into entities.

use chrono::{NaiveDate, NaiveDateTime};
use entities::{Project, Task, User};
use serde::{Deserialize, Serialize};

/// Returned by both login and register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub full_name: String,
}

impl LoginResponse {
    /// The identity carried by the response. The backend sends no user ID,
    /// so the email doubles as one.
    pub fn user(&self) -> User {
        User::new(&self.email, &self.email, &self.full_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub total_tasks: u32,
    #[serde(default)]
    pub completed_tasks: u32,
    #[serde(default)]
    pub progress_percentage: f64,
}

impl From<ProjectResponse> for Project {
    fn from(response: ProjectResponse) -> Self {
        Project {
            id: response.id,
            title: response.title,
            description: response.description,
            created_at: response.created_at,
            tasks: Vec::new(),
            total_tasks: response.total_tasks,
            completed_tasks: response.completed_tasks,
            progress_percentage: response.progress_percentage,
        }
    }
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        ProjectResponse {
            id: project.id,
            title: project.title.clone(),
            description: project.description.clone(),
            created_at: project.created_at,
            total_tasks: project.total_tasks,
            completed_tasks: project.completed_tasks,
            progress_percentage: project.progress_percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub project_id: i64,
}

impl From<TaskResponse> for Task {
    fn from(response: TaskResponse) -> Self {
        Task {
            id: response.id,
            title: response.title,
            description: response.description,
            due_date: response.due_date,
            completed: response.completed,
            created_at: response.created_at,
            project_id: response.project_id,
        }
    }
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        TaskResponse {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            completed: task.completed,
            created_at: task.created_at,
            project_id: task.project_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_response_from_backend_json() {
        let json = r#"{
            "id": 12,
            "title": "Website Redesign",
            "description": null,
            "createdAt": "2024-01-01T10:15:30.123456",
            "totalTasks": 3,
            "completedTasks": 2,
            "progressPercentage": 66.66666666666667
        }"#;
        let response: ProjectResponse = serde_json::from_str(json).unwrap();
        let project = Project::from(response);

        assert_eq!(project.id, 12);
        assert_eq!(project.description, None);
        assert!(project.tasks.is_empty());
        assert_eq!(project.total_tasks, 3);
        assert_eq!(project.completed_tasks, 2);
    }

    #[test]
    fn test_task_response_from_backend_json() {
        let json = r#"{
            "id": 5,
            "title": "Testing",
            "description": "QA testing and bug fixes",
            "dueDate": "2024-03-15",
            "completed": false,
            "createdAt": "2024-01-10T08:00:00",
            "projectId": 12
        }"#;
        let task: Task = serde_json::from_str::<TaskResponse>(json).unwrap().into();

        assert_eq!(task.project_id, 12);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert!(!task.completed);
    }

    #[test]
    fn test_login_response_user() {
        let json = r#"{"token":"abc","email":"ada@example.com","fullName":"Ada Lovelace"}"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        let user = response.user();

        assert_eq!(user.id, "ada@example.com");
        assert_eq!(user.name, "Ada Lovelace");
    }
}
