//! Task-related entity definitions.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A titled unit of work owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Due date.
    pub due_date: NaiveDate,
    /// Whether the task is done.
    pub completed: bool,
    /// When this record was created.
    pub created_at: NaiveDateTime,
    /// ID of the owning project.
    pub project_id: i64,
}

impl Task {
    /// Creates a new, not yet completed task.
    pub fn new(
        id: i64,
        project_id: i64,
        title: impl Into<String>,
        due_date: NaiveDate,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            due_date,
            completed: false,
            created_at,
            project_id,
        }
    }

    /// Sets the description for this task.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the completion flag for this task.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Returns true if the task is open and its due date lies before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date < today
    }
}
