//! Progress figures derived from project task lists.

use serde::{Deserialize, Serialize};

use crate::Project;

/// Completion of a single project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectProgress {
    /// Number of tasks in the project.
    pub total: u32,
    /// Number of completed tasks.
    pub completed: u32,
    /// `completed / total` as a whole percentage, rounded half up.
    pub percentage: u32,
}

impl ProjectProgress {
    /// Builds the progress for the given counts.
    ///
    /// A project without tasks is at 0%.
    pub fn from_counts(completed: u32, total: u32) -> Self {
        let completed = completed.min(total);
        Self {
            total,
            completed,
            percentage: percentage(completed, total),
        }
    }
}

/// Aggregate figures across all projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TotalStats {
    /// Number of projects.
    pub total_projects: u32,
    /// Number of tasks across all projects.
    pub total_tasks: u32,
    /// Number of completed tasks across all projects.
    pub completed_tasks: u32,
}

impl TotalStats {
    /// Sums the per-project counts.
    pub fn from_projects(projects: &[Project]) -> Self {
        projects.iter().fold(Self::default(), |mut stats, project| {
            let progress = project.progress();
            stats.total_projects += 1;
            stats.total_tasks += progress.total;
            stats.completed_tasks += progress.completed;
            stats
        })
    }

    /// Overall completion rate as a whole percentage.
    pub fn completion_rate(&self) -> u32 {
        percentage(self.completed_tasks, self.total_tasks)
    }
}

fn percentage(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (completed, total) = (u64::from(completed), u64::from(total));
    ((200 * completed + total) / (2 * total)) as u32
}
