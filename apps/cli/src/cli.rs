//! Command-line interface definition

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(about = "Track projects, tasks and their progress", version)]
pub struct Cli {
    /// Use built-in demo data and mock sign-in instead of the backend
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in
    Login {
        #[arg(long, short, default_value = "")]
        email: String,
        #[arg(long, short, default_value = "")]
        password: String,
    },

    /// Create an account and sign in
    Signup {
        #[arg(long, short, default_value = "")]
        email: String,
        #[arg(long, short, default_value = "")]
        password: String,
        /// Full name
        #[arg(long, short, default_value = "")]
        name: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Dashboard overview: statistics and recent projects
    Overview,

    /// Manage projects
    #[command(subcommand)]
    Projects(ProjectCommand),

    /// Manage the tasks of a project
    #[command(subcommand)]
    Tasks(TaskCommand),

    /// Check that the backend is reachable
    Status,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List all projects
    List,

    /// Show a project with its pending and completed tasks
    Show { id: i64 },

    /// Create a project
    Create(ProjectFields),

    /// Change title and description of a project
    Update {
        id: i64,
        #[command(flatten)]
        fields: ProjectFields,
    },

    /// Delete a project and all its tasks
    Delete { id: i64 },
}

#[derive(Args, Debug)]
pub struct ProjectFields {
    /// Project title
    #[arg(long, short, default_value = "")]
    pub title: String,

    /// Project description
    #[arg(long, short)]
    pub description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Add a task to a project
    Add {
        project: i64,
        #[command(flatten)]
        fields: TaskFields,
    },

    /// Change title, description and due date of a task
    Update {
        project: i64,
        task: i64,
        #[command(flatten)]
        fields: TaskFields,
    },

    /// Toggle the completion of a task
    Toggle { project: i64, task: i64 },

    /// Delete a task
    Delete { project: i64, task: i64 },
}

#[derive(Args, Debug)]
pub struct TaskFields {
    /// Task title
    #[arg(long, short, default_value = "")]
    pub title: String,

    /// Task description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
}
