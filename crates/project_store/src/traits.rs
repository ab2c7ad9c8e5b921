//! Backend trait definitions.

use api_protocol::{ProjectRequest, TaskRequest};
use async_trait::async_trait;
use entities::{Project, Task};

use crate::ProjectStoreResult;

/// Trait for the system of record behind the project store.
///
/// Projects returned by [`ProjectBackend::list_projects`] carry no tasks;
/// those are fetched per project.
#[async_trait]
pub trait ProjectBackend: Send + Sync {
    // =========================================================================
    // Project operations
    // =========================================================================

    /// Lists all projects, without their tasks.
    async fn list_projects(&self) -> ProjectStoreResult<Vec<Project>>;

    /// Creates a new project.
    async fn create_project(&self, request: ProjectRequest) -> ProjectStoreResult<Project>;

    /// Replaces title and description of a project.
    async fn update_project(&self, id: i64, request: ProjectRequest)
        -> ProjectStoreResult<Project>;

    /// Deletes a project and its tasks.
    async fn delete_project(&self, id: i64) -> ProjectStoreResult<()>;

    // =========================================================================
    // Task operations
    // =========================================================================

    /// Lists the tasks of a project.
    async fn list_tasks(&self, project_id: i64) -> ProjectStoreResult<Vec<Task>>;

    /// Creates a task in a project.
    async fn create_task(&self, project_id: i64, request: TaskRequest)
        -> ProjectStoreResult<Task>;

    /// Replaces title, description and due date of a task.
    async fn update_task(
        &self,
        project_id: i64,
        task_id: i64,
        request: TaskRequest,
    ) -> ProjectStoreResult<Task>;

    /// Flips the completion flag of a task and returns the stored task.
    async fn toggle_task(&self, project_id: i64, task_id: i64) -> ProjectStoreResult<Task>;

    /// Deletes a task.
    async fn delete_task(&self, project_id: i64, task_id: i64) -> ProjectStoreResult<()>;
}
