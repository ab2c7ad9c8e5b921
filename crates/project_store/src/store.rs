//! The project store.
//!
//! Holds every project of the signed-in user with its tasks embedded and
//! keeps that collection in step with a [`ProjectBackend`]. Except for the
//! completion toggle, local state changes only after the backend accepted
//! the change.

use std::sync::Arc;

use api_protocol::{ProjectRequest, TaskRequest};
use chrono::NaiveDate;
use entities::{Project, ProjectProgress, Task, TotalStats};
use futures::future::join_all;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::{ProjectBackend, ProjectStoreError, ProjectStoreResult};

#[derive(Debug, Default)]
struct StoreState {
    projects: Vec<Project>,
    is_loading: bool,
}

impl StoreState {
    fn project_mut(&mut self, id: i64) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    fn task_mut(&mut self, project_id: i64, task_id: i64) -> Option<&mut Task> {
        self.project_mut(project_id)?.task_mut(task_id)
    }

    /// Applies `f` to a task and re-syncs the owning project's counters.
    fn with_task<F>(&mut self, project_id: i64, task_id: i64, f: F) -> bool
    where
        F: FnOnce(&mut Task),
    {
        let Some(project) = self.project_mut(project_id) else {
            return false;
        };
        let Some(task) = project.task_mut(task_id) else {
            return false;
        };
        f(task);
        project.sync_counters();
        true
    }
}

/// Ensures every task names the project that holds it.
fn adopt_tasks(project_id: i64, tasks: &mut [Task]) {
    for task in tasks.iter_mut().filter(|t| t.project_id != project_id) {
        warn!(
            project_id,
            task_id = task.id,
            reported_project_id = task.project_id,
            "Task reported under a different project; re-owning it"
        );
        task.project_id = project_id;
    }
}

/// In-memory project collection backed by a [`ProjectBackend`].
pub struct ProjectStore {
    backend: Arc<dyn ProjectBackend>,
    state: RwLock<StoreState>,
}

impl ProjectStore {
    /// Creates an empty store. Call [`ProjectStore::load`] to fill it.
    pub fn new(backend: Arc<dyn ProjectBackend>) -> Self {
        Self {
            backend,
            state: RwLock::new(StoreState::default()),
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetches all projects, then every project's tasks concurrently.
    ///
    /// A project whose tasks cannot be fetched is kept with an empty task
    /// list. If the project list itself cannot be fetched the collection is
    /// left as it was.
    pub async fn load(&self) -> ProjectStoreResult<()> {
        self.state.write().await.is_loading = true;

        let projects = match self.backend.list_projects().await {
            Ok(projects) => projects,
            Err(e) => {
                self.state.write().await.is_loading = false;
                return Err(e);
            }
        };

        let fetches = projects.iter().map(|p| self.backend.list_tasks(p.id));
        let task_lists = join_all(fetches).await;

        let projects: Vec<Project> = projects
            .into_iter()
            .zip(task_lists)
            .map(|(mut project, tasks)| {
                project.tasks = match tasks {
                    Ok(mut tasks) => {
                        adopt_tasks(project.id, &mut tasks);
                        tasks
                    }
                    Err(e) => {
                        warn!(project_id = project.id, error = %e, "Failed to load tasks");
                        Vec::new()
                    }
                };
                project.sync_counters();
                project
            })
            .collect();

        debug!(count = projects.len(), "Loaded projects");

        let mut state = self.state.write().await;
        state.projects = projects;
        state.is_loading = false;
        Ok(())
    }

    /// Reloads everything from the backend.
    pub async fn refresh(&self) -> ProjectStoreResult<()> {
        self.load().await
    }

    /// Returns true while a load is running.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All projects with their tasks.
    pub async fn projects(&self) -> Vec<Project> {
        self.state.read().await.projects.clone()
    }

    /// Gets a project by ID.
    pub async fn project(&self, id: i64) -> Option<Project> {
        let state = self.state.read().await;
        state.projects.iter().find(|p| p.id == id).cloned()
    }

    /// Progress of a project; an unknown project reports no tasks.
    pub async fn project_progress(&self, id: i64) -> ProjectProgress {
        let state = self.state.read().await;
        state
            .projects
            .iter()
            .find(|p| p.id == id)
            .map(Project::progress)
            .unwrap_or_default()
    }

    /// Aggregate figures across all projects.
    pub async fn total_stats(&self) -> TotalStats {
        TotalStats::from_projects(&self.state.read().await.projects)
    }

    // =========================================================================
    // Project operations
    // =========================================================================

    /// Creates a project and appends it to the collection.
    pub async fn add_project(
        &self,
        title: &str,
        description: Option<String>,
    ) -> ProjectStoreResult<Project> {
        let project = self
            .backend
            .create_project(ProjectRequest::new(title, description))
            .await?;

        info!(project_id = project.id, title = %project.title, "Created project");
        self.state.write().await.projects.push(project.clone());
        Ok(project)
    }

    /// Replaces title and description of a project, keeping its tasks.
    pub async fn update_project(
        &self,
        id: i64,
        title: &str,
        description: Option<String>,
    ) -> ProjectStoreResult<Project> {
        let updated = self
            .backend
            .update_project(id, ProjectRequest::new(title, description))
            .await?;

        let mut state = self.state.write().await;
        let Some(project) = state.project_mut(id) else {
            warn!(project_id = id, "Updated project is not loaded locally");
            return Ok(updated);
        };
        project.title = updated.title;
        project.description = updated.description;
        project.created_at = updated.created_at;
        project.sync_counters();
        Ok(project.clone())
    }

    /// Deletes a project and drops it, tasks included, from the collection.
    pub async fn delete_project(&self, id: i64) -> ProjectStoreResult<()> {
        self.backend.delete_project(id).await?;

        info!(project_id = id, "Deleted project");
        self.state.write().await.projects.retain(|p| p.id != id);
        Ok(())
    }

    // =========================================================================
    // Task operations
    // =========================================================================

    /// Creates a task and appends it to its project.
    pub async fn add_task(
        &self,
        project_id: i64,
        title: &str,
        description: Option<String>,
        due_date: NaiveDate,
    ) -> ProjectStoreResult<Task> {
        let mut task = self
            .backend
            .create_task(project_id, TaskRequest::new(title, description, due_date))
            .await?;
        adopt_tasks(project_id, std::slice::from_mut(&mut task));

        info!(project_id, task_id = task.id, "Created task");
        let mut state = self.state.write().await;
        if let Some(project) = state.project_mut(project_id) {
            project.tasks.push(task.clone());
            project.sync_counters();
        }
        Ok(task)
    }

    /// Replaces title, description and due date of a task.
    pub async fn update_task(
        &self,
        project_id: i64,
        task_id: i64,
        title: &str,
        description: Option<String>,
        due_date: NaiveDate,
    ) -> ProjectStoreResult<Task> {
        let mut updated = self
            .backend
            .update_task(
                project_id,
                task_id,
                TaskRequest::new(title, description, due_date),
            )
            .await?;
        adopt_tasks(project_id, std::slice::from_mut(&mut updated));

        let mut state = self.state.write().await;
        state.with_task(project_id, task_id, |task| *task = updated.clone());
        Ok(updated)
    }

    /// Deletes a task from its project.
    pub async fn delete_task(&self, project_id: i64, task_id: i64) -> ProjectStoreResult<()> {
        self.backend.delete_task(project_id, task_id).await?;

        info!(project_id, task_id, "Deleted task");
        let mut state = self.state.write().await;
        if let Some(project) = state.project_mut(project_id) {
            project.tasks.retain(|t| t.id != task_id);
            project.sync_counters();
        }
        Ok(())
    }

    /// Toggles the completion flag of a task.
    ///
    /// The task is marked completed locally before the backend answers.
    /// The flag then takes the value the backend returns, or goes back to
    /// its previous value if the request fails.
    pub async fn toggle_task(&self, project_id: i64, task_id: i64) -> ProjectStoreResult<Task> {
        let previous = {
            let mut state = self.state.write().await;
            let previous = state
                .task_mut(project_id, task_id)
                .map(|t| t.completed)
                .ok_or_else(|| ProjectStoreError::not_found("Task", task_id))?;
            state.with_task(project_id, task_id, |task| task.completed = true);
            previous
        };

        match self.backend.toggle_task(project_id, task_id).await {
            Ok(server_task) => {
                let mut state = self.state.write().await;
                let applied = state.with_task(project_id, task_id, |task| {
                    task.completed = server_task.completed;
                });
                if !applied {
                    debug!(project_id, task_id, "Toggled task vanished before reconcile");
                }
                info!(project_id, task_id, completed = server_task.completed, "Toggled task");
                Ok(server_task)
            }
            Err(e) => {
                warn!(project_id, task_id, error = %e, "Toggle failed; restoring previous state");
                let mut state = self.state.write().await;
                state.with_task(project_id, task_id, |task| task.completed = previous);
                Err(e)
            }
        }
    }
}
