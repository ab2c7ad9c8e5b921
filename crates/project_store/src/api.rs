//! REST backend implementation.

use api_client::ApiClient;
use api_protocol::{ProjectRequest, TaskRequest};
use async_trait::async_trait;
use entities::{Project, Task};

use crate::{ProjectBackend, ProjectStoreResult};

#[async_trait]
impl ProjectBackend for ApiClient {
    async fn list_projects(&self) -> ProjectStoreResult<Vec<Project>> {
        let projects = ApiClient::list_projects(self).await?;
        Ok(projects.into_iter().map(Project::from).collect())
    }

    async fn create_project(&self, request: ProjectRequest) -> ProjectStoreResult<Project> {
        Ok(ApiClient::create_project(self, &request).await?.into())
    }

    async fn update_project(
        &self,
        id: i64,
        request: ProjectRequest,
    ) -> ProjectStoreResult<Project> {
        Ok(ApiClient::update_project(self, id, &request).await?.into())
    }

    async fn delete_project(&self, id: i64) -> ProjectStoreResult<()> {
        Ok(ApiClient::delete_project(self, id).await?)
    }

    async fn list_tasks(&self, project_id: i64) -> ProjectStoreResult<Vec<Task>> {
        let tasks = ApiClient::list_tasks(self, project_id).await?;
        Ok(tasks.into_iter().map(Task::from).collect())
    }

    async fn create_task(
        &self,
        project_id: i64,
        request: TaskRequest,
    ) -> ProjectStoreResult<Task> {
        Ok(ApiClient::create_task(self, project_id, &request).await?.into())
    }

    async fn update_task(
        &self,
        project_id: i64,
        task_id: i64,
        request: TaskRequest,
    ) -> ProjectStoreResult<Task> {
        Ok(ApiClient::update_task(self, project_id, task_id, &request)
            .await?
            .into())
    }

    async fn toggle_task(&self, project_id: i64, task_id: i64) -> ProjectStoreResult<Task> {
        Ok(ApiClient::toggle_task(self, project_id, task_id).await?.into())
    }

    async fn delete_task(&self, project_id: i64, task_id: i64) -> ProjectStoreResult<()> {
        Ok(ApiClient::delete_task(self, project_id, task_id).await?)
    }
}
