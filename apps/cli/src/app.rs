//! Command dispatch
//!
//! Wires the stores to a backend and turns each command into store actions
//! and rendered output. Dashboard commands are gated on a signed-in user.

use std::sync::Arc;

use anyhow::{bail, Context};
use api_client::ApiClient;
use auth::{ApiAuthenticator, AuthStore, Authenticator, MockAuthenticator};
use chrono::{Local, NaiveDate};
use project_store::{demo_backend, ProjectBackend, ProjectStore, ProjectStoreError};
use session::{FileSessionStorage, SessionStorage};
use tracing::{debug, info};

use crate::cli::{Command, ProjectCommand, ProjectFields, TaskCommand, TaskFields};
use crate::config::CliConfig;
use crate::render;

/// Validated project form input
struct ProjectInput {
    title: String,
    description: Option<String>,
}

/// Validated task form input
struct TaskInput {
    title: String,
    description: Option<String>,
    due_date: NaiveDate,
}

fn clean(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

impl TryFrom<ProjectFields> for ProjectInput {
    type Error = anyhow::Error;

    fn try_from(fields: ProjectFields) -> anyhow::Result<Self> {
        let title = fields.title.trim();
        if title.is_empty() {
            bail!("Please enter a project title.");
        }
        Ok(Self {
            title: title.to_string(),
            description: clean(fields.description),
        })
    }
}

impl TryFrom<TaskFields> for TaskInput {
    type Error = anyhow::Error;

    fn try_from(fields: TaskFields) -> anyhow::Result<Self> {
        let title = fields.title.trim();
        if title.is_empty() {
            bail!("Please enter a task title.");
        }
        let Some(due) = fields.due.filter(|d| !d.trim().is_empty()) else {
            bail!("Please select a due date.");
        };
        let due_date = NaiveDate::parse_from_str(due.trim(), "%Y-%m-%d")
            .with_context(|| format!("Please enter the due date as YYYY-MM-DD, not '{due}'."))?;
        Ok(Self {
            title: title.to_string(),
            description: clean(fields.description),
            due_date,
        })
    }
}

/// The client application: both stores and, when online, the HTTP client
pub struct App {
    auth: AuthStore,
    projects: ProjectStore,
    client: Option<ApiClient>,
}

impl App {
    /// Builds the application described by `config`
    pub fn from_config(config: &CliConfig) -> anyhow::Result<Self> {
        let storage: Arc<dyn SessionStorage> =
            Arc::new(FileSessionStorage::new(config.session_path()));

        if config.offline {
            info!("Running offline with demo data");
            return Ok(Self::offline(storage));
        }

        let client = match config.timeout() {
            Some(timeout) => ApiClient::with_timeout(&config.api_base_url, storage.clone(), timeout)?,
            None => ApiClient::new(&config.api_base_url, storage.clone()),
        };
        debug!(base_url = %client.base_url(), "Using REST backend");

        let authenticator = Arc::new(ApiAuthenticator::new(client.clone()));
        let backend = Arc::new(client.clone());
        Ok(Self::new(storage, authenticator, backend, Some(client)))
    }

    /// Mock sign-in and a fresh copy of the demo projects
    pub fn offline(storage: Arc<dyn SessionStorage>) -> Self {
        Self::new(
            storage,
            Arc::new(MockAuthenticator::new()),
            Arc::new(demo_backend()),
            None,
        )
    }

    pub fn new(
        storage: Arc<dyn SessionStorage>,
        authenticator: Arc<dyn Authenticator>,
        backend: Arc<dyn ProjectBackend>,
        client: Option<ApiClient>,
    ) -> Self {
        Self {
            auth: AuthStore::load(storage, authenticator),
            projects: ProjectStore::new(backend),
            client,
        }
    }

    /// Runs one command and returns its output
    pub async fn run(&self, command: Command) -> anyhow::Result<String> {
        match command {
            Command::Login { email, password } => {
                let user = self.auth.login(&email, &password).await?;
                Ok(format!(
                    "Welcome back! You have successfully signed in as {}.\n",
                    user.email
                ))
            }
            Command::Signup {
                email,
                password,
                name,
            } => {
                let user = self.auth.signup(&email, &password, &name).await?;
                Ok(format!("Account created. Signed in as {}.\n", user.email))
            }
            Command::Logout => {
                self.auth.logout().await?;
                Ok("Signed out.\n".to_string())
            }
            Command::Whoami => Ok(match self.auth.user().await {
                Some(user) => format!("{} <{}>\n", user.display_name(), user.email),
                None => "Not signed in.\n".to_string(),
            }),
            Command::Status => self.status().await,
            Command::Overview => {
                self.enter_dashboard().await?;
                let user = self.auth.user().await;
                let stats = self.projects.total_stats().await;
                let projects = self.projects.projects().await;
                Ok(render::overview(user.as_ref(), &stats, &projects))
            }
            Command::Projects(command) => {
                self.enter_dashboard().await?;
                self.run_project(command).await
            }
            Command::Tasks(command) => {
                self.enter_dashboard().await?;
                self.run_task(command).await
            }
        }
    }

    /// Route guard for dashboard commands, followed by a fresh load
    async fn enter_dashboard(&self) -> anyhow::Result<()> {
        self.auth.require_user().await?;
        self.projects.load().await?;
        Ok(())
    }

    async fn status(&self) -> anyhow::Result<String> {
        let mut out = match &self.client {
            Some(client) => {
                let status = client.health_check().await?;
                format!(
                    "Backend reachable at {} (HTTP {})\n",
                    client.base_url(),
                    status.as_u16()
                )
            }
            None => "Offline mode: using built-in demo data.\n".to_string(),
        };
        match self.auth.user().await {
            Some(user) => out.push_str(&format!("Signed in as {}\n", user.email)),
            None => out.push_str("Not signed in\n"),
        }
        Ok(out)
    }

    async fn run_project(&self, command: ProjectCommand) -> anyhow::Result<String> {
        match command {
            ProjectCommand::List => Ok(render::project_list(&self.projects.projects().await)),
            ProjectCommand::Show { id } => {
                let project = self
                    .projects
                    .project(id)
                    .await
                    .ok_or_else(|| ProjectStoreError::not_found("Project", id))?;
                Ok(render::project_details(&project, today()))
            }
            ProjectCommand::Create(fields) => {
                let input = ProjectInput::try_from(fields)?;
                let project = self
                    .projects
                    .add_project(&input.title, input.description)
                    .await?;
                Ok(format!(
                    "Project created! Your new project has been created successfully.\n\n{}",
                    render::project_card(&project)
                ))
            }
            ProjectCommand::Update { id, fields } => {
                let input = ProjectInput::try_from(fields)?;
                let project = self
                    .projects
                    .update_project(id, &input.title, input.description)
                    .await?;
                Ok(format!("Project updated.\n\n{}", render::project_card(&project)))
            }
            ProjectCommand::Delete { id } => {
                self.projects.delete_project(id).await?;
                Ok("Project deleted. The project has been permanently deleted.\n".to_string())
            }
        }
    }

    async fn run_task(&self, command: TaskCommand) -> anyhow::Result<String> {
        match command {
            TaskCommand::Add { project, fields } => {
                let input = TaskInput::try_from(fields)?;
                let task = self
                    .projects
                    .add_task(project, &input.title, input.description, input.due_date)
                    .await?;
                Ok(format!(
                    "Task added! Your new task has been created.\n\n{}",
                    render::task_line(&task, today())
                ))
            }
            TaskCommand::Update {
                project,
                task,
                fields,
            } => {
                let input = TaskInput::try_from(fields)?;
                let task = self
                    .projects
                    .update_task(
                        project,
                        task,
                        &input.title,
                        input.description,
                        input.due_date,
                    )
                    .await?;
                Ok(format!(
                    "Task updated.\n\n{}",
                    render::task_line(&task, today())
                ))
            }
            TaskCommand::Toggle { project, task } => {
                let task = self.projects.toggle_task(project, task).await?;
                let progress = self.projects.project_progress(project).await;
                let state = if task.completed { "completed" } else { "pending" };
                Ok(format!(
                    "Task #{} marked {}.\nProject progress {}\n",
                    task.id,
                    state,
                    render::progress_bar(progress.percentage)
                ))
            }
            TaskCommand::Delete { project, task } => {
                self.projects.delete_task(project, task).await?;
                Ok("Task deleted.\n".to_string())
            }
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
