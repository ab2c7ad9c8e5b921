//! Demo data for offline mode.

use chrono::{NaiveDate, NaiveDateTime};
use entities::{Project, Task};

use crate::MemoryProjectBackend;

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap_or_default()
}

fn midnight(month: u32, day: u32) -> NaiveDateTime {
    date(month, day).and_time(chrono::NaiveTime::MIN)
}

/// (id, title, description, due, done, created)
type TaskRow = (i64, &'static str, &'static str, (u32, u32), bool, (u32, u32));

fn tasks(project_id: i64, rows: &[TaskRow]) -> Vec<Task> {
    rows.iter()
        .map(|&(id, title, description, (dm, dd), done, (cm, cd))| {
            Task::new(id, project_id, title, date(dm, dd), midnight(cm, cd))
                .with_description(description)
                .with_completed(done)
        })
        .collect()
}

/// Three sample projects with a mix of open and completed tasks.
pub fn demo_projects() -> Vec<Project> {
    vec![
        Project::new(1, "Website Redesign", midnight(1, 1))
            .with_description("Complete overhaul of the company website with modern design")
            .with_tasks(tasks(
                1,
                &[
                    (1, "Design mockups", "Create initial design concepts", (2, 15), true, (1, 1)),
                    (2, "Frontend development", "Implement the new design", (3, 1), true, (1, 5)),
                    (3, "Testing", "QA testing and bug fixes", (3, 15), false, (1, 10)),
                ],
            )),
        Project::new(2, "Mobile App Development", midnight(1, 15))
            .with_description("Build a cross-platform mobile application")
            .with_tasks(tasks(
                2,
                &[
                    (4, "Requirements gathering", "Collect all requirements", (2, 1), true, (1, 15)),
                    (5, "UI/UX Design", "Design the mobile interface", (2, 20), false, (1, 20)),
                    (6, "API Integration", "Connect to backend services", (3, 10), false, (1, 25)),
                    (7, "App Store submission", "Prepare and submit to stores", (4, 1), false, (1, 30)),
                ],
            )),
        Project::new(3, "Marketing Campaign", midnight(1, 10))
            .with_description("Q1 digital marketing campaign")
            .with_tasks(tasks(
                3,
                &[
                    (8, "Strategy planning", "Define campaign goals and KPIs", (1, 20), true, (1, 10)),
                    (9, "Content creation", "Create marketing materials", (2, 5), true, (1, 12)),
                ],
            )),
    ]
}

/// A memory backend pre-filled with [`demo_projects`].
pub fn demo_backend() -> MemoryProjectBackend {
    MemoryProjectBackend::with_projects(demo_projects())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProjectStore;
    use std::sync::Arc;

    #[test]
    fn test_demo_projects_progress() {
        let projects = demo_projects();
        let percentages: Vec<u32> = projects.iter().map(|p| p.progress().percentage).collect();
        assert_eq!(percentages, vec![67, 25, 100]);
    }

    #[tokio::test]
    async fn test_demo_backend_loads_into_store() {
        let store = ProjectStore::new(Arc::new(demo_backend()));
        store.load().await.unwrap();

        let stats = store.total_stats().await;
        assert_eq!(stats.total_projects, 3);
        assert_eq!(stats.total_tasks, 9);
        assert_eq!(stats.completed_tasks, 5);
        assert_eq!(stats.completion_rate(), 56);
    }
}
