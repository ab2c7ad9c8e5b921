//! Project-related entity definitions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{ProjectProgress, Task};

/// A named container of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier.
    pub id: i64,
    /// Project title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// When this record was created.
    pub created_at: NaiveDateTime,
    /// Tasks of this project, in server order.
    pub tasks: Vec<Task>,
    /// Task count as last reported by the server.
    pub total_tasks: u32,
    /// Completed task count as last reported by the server.
    pub completed_tasks: u32,
    /// Progress as last reported by the server.
    pub progress_percentage: f64,
}

impl Project {
    /// Creates a new project without tasks.
    pub fn new(id: i64, title: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            created_at,
            tasks: Vec::new(),
            total_tasks: 0,
            completed_tasks: 0,
            progress_percentage: 0.0,
        }
    }

    /// Sets the description for this project.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the tasks for this project.
    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self.sync_counters();
        self
    }

    /// Progress computed from the embedded tasks.
    pub fn progress(&self) -> ProjectProgress {
        let completed = self.tasks.iter().filter(|t| t.completed).count() as u32;
        ProjectProgress::from_counts(completed, self.tasks.len() as u32)
    }

    /// Recomputes the server-style counters from the embedded tasks.
    pub fn sync_counters(&mut self) {
        let progress = self.progress();
        self.total_tasks = progress.total;
        self.completed_tasks = progress.completed;
        self.progress_percentage = if progress.total == 0 {
            0.0
        } else {
            f64::from(progress.completed) * 100.0 / f64::from(progress.total)
        };
    }

    /// Gets a task by ID.
    pub fn task(&self, task_id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Gets a mutable task by ID.
    pub fn task_mut(&mut self, task_id: i64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }

    /// Tasks still open.
    pub fn pending_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }

    /// Tasks already done.
    pub fn done_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.completed)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::TotalStats;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn project_with(id: i64, done: &[bool]) -> Project {
        let tasks = done
            .iter()
            .enumerate()
            .map(|(i, completed)| {
                Task::new(i as i64 + 1, id, format!("Task {i}"), at(2024, 3, 1).date(), at(2024, 1, 1))
                    .with_completed(*completed)
            })
            .collect();
        Project::new(id, format!("Project {id}"), at(2024, 1, 1)).with_tasks(tasks)
    }

    #[test]
    fn test_project_progress() {
        let project = project_with(1, &[true, false, false, false]);
        assert_eq!(
            project.progress(),
            ProjectProgress {
                total: 4,
                completed: 1,
                percentage: 25
            }
        );
        assert_eq!(project.total_tasks, 4);
        assert_eq!(project.completed_tasks, 1);
        assert_eq!(project.progress_percentage, 25.0);
    }

    #[test]
    fn test_empty_project_progress() {
        let project = Project::new(1, "Empty", at(2024, 1, 1));
        assert_eq!(project.progress().percentage, 0);
    }

    #[test]
    fn test_pending_and_done_partition() {
        let project = project_with(2, &[true, false, true]);
        assert_eq!(project.pending_tasks().count(), 1);
        assert_eq!(project.done_tasks().count(), 2);
    }

    #[test]
    fn test_total_stats_sum_projects() {
        let projects = vec![
            project_with(1, &[true, true, false]),
            project_with(2, &[true, false, false, false]),
            project_with(3, &[]),
        ];
        let stats = TotalStats::from_projects(&projects);

        let summed_total: u32 = projects.iter().map(|p| p.progress().total).sum();
        let summed_done: u32 = projects.iter().map(|p| p.progress().completed).sum();
        assert_eq!(stats.total_projects, 3);
        assert_eq!(stats.total_tasks, summed_total);
        assert_eq!(stats.completed_tasks, summed_done);
        assert_eq!(stats.total_tasks, 7);
        assert_eq!(stats.completed_tasks, 3);
    }
}
