//! In-memory backend for offline use and tests.
//!
//! Mirrors what the REST backend does: sequential IDs, server-side
//! timestamps, a toggle that flips the stored flag, and not-found errors for
//! unknown IDs.

use std::{collections::BTreeMap, sync::Arc};

use api_protocol::{ProjectRequest, TaskRequest};
use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use entities::{Project, Task};
use tokio::sync::RwLock;

use crate::{ProjectBackend, ProjectStoreError, ProjectStoreResult};

#[derive(Debug, Default)]
struct MemoryState {
    projects: BTreeMap<i64, Project>,
    next_project_id: i64,
    next_task_id: i64,
}

impl MemoryState {
    fn project_mut(&mut self, id: i64) -> ProjectStoreResult<&mut Project> {
        self.projects
            .get_mut(&id)
            .ok_or_else(|| ProjectStoreError::not_found("Project", id))
    }
}

/// In-memory project backend.
#[derive(Debug, Default, Clone)]
pub struct MemoryProjectBackend {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryProjectBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend holding the given projects and their tasks.
    ///
    /// IDs are kept as given; new records get IDs above the highest one.
    pub fn with_projects(projects: Vec<Project>) -> Self {
        let mut state = MemoryState::default();
        for mut project in projects {
            for task in &mut project.tasks {
                task.project_id = project.id;
                state.next_task_id = state.next_task_id.max(task.id);
            }
            project.sync_counters();
            state.next_project_id = state.next_project_id.max(project.id);
            state.projects.insert(project.id, project);
        }
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }
}

fn without_tasks(project: &Project) -> Project {
    Project {
        tasks: Vec::new(),
        ..project.clone()
    }
}

#[async_trait]
impl ProjectBackend for MemoryProjectBackend {
    // =========================================================================
    // Project operations
    // =========================================================================

    async fn list_projects(&self) -> ProjectStoreResult<Vec<Project>> {
        let state = self.state.read().await;
        Ok(state.projects.values().map(without_tasks).collect())
    }

    async fn create_project(&self, request: ProjectRequest) -> ProjectStoreResult<Project> {
        let mut state = self.state.write().await;
        state.next_project_id += 1;
        let mut project = Project::new(state.next_project_id, request.title, Self::now());
        project.description = request.description;
        state.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        id: i64,
        request: ProjectRequest,
    ) -> ProjectStoreResult<Project> {
        let mut state = self.state.write().await;
        let project = state.project_mut(id)?;
        project.title = request.title;
        project.description = request.description;
        Ok(without_tasks(project))
    }

    async fn delete_project(&self, id: i64) -> ProjectStoreResult<()> {
        let mut state = self.state.write().await;
        if state.projects.remove(&id).is_none() {
            return Err(ProjectStoreError::not_found("Project", id));
        }
        Ok(())
    }

    // =========================================================================
    // Task operations
    // =========================================================================

    async fn list_tasks(&self, project_id: i64) -> ProjectStoreResult<Vec<Task>> {
        let state = self.state.read().await;
        state
            .projects
            .get(&project_id)
            .map(|p| p.tasks.clone())
            .ok_or_else(|| ProjectStoreError::not_found("Project", project_id))
    }

    async fn create_task(
        &self,
        project_id: i64,
        request: TaskRequest,
    ) -> ProjectStoreResult<Task> {
        let mut state = self.state.write().await;
        let task_id = state.next_task_id + 1;
        let project = state.project_mut(project_id)?;

        let mut task = Task::new(task_id, project_id, request.title, request.due_date, Self::now());
        task.description = request.description;
        project.tasks.push(task.clone());
        project.sync_counters();

        state.next_task_id = task_id;
        Ok(task)
    }

    async fn update_task(
        &self,
        project_id: i64,
        task_id: i64,
        request: TaskRequest,
    ) -> ProjectStoreResult<Task> {
        let mut state = self.state.write().await;
        let task = state
            .project_mut(project_id)?
            .task_mut(task_id)
            .ok_or_else(|| ProjectStoreError::not_found("Task", task_id))?;
        task.title = request.title;
        task.description = request.description;
        task.due_date = request.due_date;
        Ok(task.clone())
    }

    async fn toggle_task(&self, project_id: i64, task_id: i64) -> ProjectStoreResult<Task> {
        let mut state = self.state.write().await;
        let project = state.project_mut(project_id)?;
        let task = project
            .task_mut(task_id)
            .ok_or_else(|| ProjectStoreError::not_found("Task", task_id))?;
        task.completed = !task.completed;
        let task = task.clone();
        project.sync_counters();
        Ok(task)
    }

    async fn delete_task(&self, project_id: i64, task_id: i64) -> ProjectStoreResult<()> {
        let mut state = self.state.write().await;
        let project = state.project_mut(project_id)?;
        let before = project.tasks.len();
        project.tasks.retain(|t| t.id != task_id);
        if project.tasks.len() == before {
            return Err(ProjectStoreError::not_found("Task", task_id));
        }
        project.sync_counters();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[tokio::test]
    async fn test_project_crud() {
        let backend = MemoryProjectBackend::new();

        // Create
        let created = backend
            .create_project(ProjectRequest::new("Website", None))
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        // Update
        let updated = backend
            .update_project(created.id, ProjectRequest::new("Website v2", Some("New".into())))
            .await
            .unwrap();
        assert_eq!(updated.title, "Website v2");
        assert_eq!(updated.description.as_deref(), Some("New"));

        // List
        assert_eq!(backend.list_projects().await.unwrap().len(), 1);

        // Delete
        backend.delete_project(created.id).await.unwrap();
        assert!(backend.list_projects().await.unwrap().is_empty());
        assert!(matches!(
            backend.delete_project(created.id).await,
            Err(ProjectStoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_task_crud_and_counters() {
        let backend = MemoryProjectBackend::new();
        let project = backend
            .create_project(ProjectRequest::new("Website", None))
            .await
            .unwrap();

        let first = backend
            .create_task(project.id, TaskRequest::new("Design", None, due()))
            .await
            .unwrap();
        backend
            .create_task(project.id, TaskRequest::new("Build", None, due()))
            .await
            .unwrap();

        let toggled = backend.toggle_task(project.id, first.id).await.unwrap();
        assert!(toggled.completed);

        let listed = backend.list_projects().await.unwrap();
        assert!(listed[0].tasks.is_empty());
        assert_eq!(listed[0].total_tasks, 2);
        assert_eq!(listed[0].completed_tasks, 1);
        assert_eq!(listed[0].progress_percentage, 50.0);

        backend.delete_task(project.id, first.id).await.unwrap();
        let tasks = backend.list_tasks(project.id).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Build");
    }

    #[tokio::test]
    async fn test_unknown_ids() {
        let backend = MemoryProjectBackend::new();

        assert!(backend.list_tasks(42).await.is_err());
        assert!(backend.toggle_task(42, 1).await.is_err());
        assert!(backend
            .create_task(42, TaskRequest::new("x", None, due()))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_seeded_ids_continue() {
        let created_at = due().and_hms_opt(0, 0, 0).unwrap();
        let seeded = Project::new(7, "Seeded", created_at)
            .with_tasks(vec![Task::new(11, 99, "Old", due(), created_at)]);
        let backend = MemoryProjectBackend::with_projects(vec![seeded]);

        // Tasks are re-owned by the project holding them
        assert_eq!(backend.list_tasks(7).await.unwrap()[0].project_id, 7);

        let project = backend
            .create_project(ProjectRequest::new("Next", None))
            .await
            .unwrap();
        assert_eq!(project.id, 8);
        let task = backend
            .create_task(7, TaskRequest::new("New", None, due()))
            .await
            .unwrap();
        assert_eq!(task.id, 12);
    }
}
