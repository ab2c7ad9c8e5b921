//! Endpoint paths, relative to the API base URL.

/// Authentication endpoints
pub mod auth_paths {
    pub const LOGIN: &str = "/auth/login";
    pub const REGISTER: &str = "/auth/register";
}

/// Collection of all projects.
pub fn projects_path() -> String {
    "/projects".to_string()
}

/// A single project.
pub fn project_path(project_id: i64) -> String {
    format!("/projects/{}", project_id)
}

/// Tasks of a project.
pub fn tasks_path(project_id: i64) -> String {
    format!("/projects/{}/tasks", project_id)
}

/// A single task of a project.
pub fn task_path(project_id: i64, task_id: i64) -> String {
    format!("/projects/{}/tasks/{}", project_id, task_id)
}

/// Completion toggle of a task.
pub fn task_toggle_path(project_id: i64, task_id: i64) -> String {
    format!("/projects/{}/tasks/{}/toggle", project_id, task_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(project_path(4), "/projects/4");
        assert_eq!(tasks_path(4), "/projects/4/tasks");
        assert_eq!(task_path(4, 9), "/projects/4/tasks/9");
        assert_eq!(task_toggle_path(4, 9), "/projects/4/tasks/9/toggle");
    }
}
