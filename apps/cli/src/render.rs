//! Plain-text views of store state.

use std::fmt::Write;

use chrono::NaiveDate;
use entities::{Project, Task, TotalStats, User};

/// Cells in a progress bar.
const BAR_WIDTH: u32 = 10;

/// Projects shown on the overview.
pub const RECENT_PROJECTS: usize = 3;

fn date(d: NaiveDate) -> String {
    d.format("%b %-d, %Y").to_string()
}

/// Renders `[#####-----] 50%`.
pub fn progress_bar(percentage: u32) -> String {
    let percentage = percentage.min(100);
    let filled = (percentage * BAR_WIDTH + 50) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled as usize),
        "-".repeat((BAR_WIDTH - filled) as usize),
        percentage
    )
}

/// First word of the user's name.
pub fn first_name(user: Option<&User>) -> &str {
    user.and_then(|u| u.name.split_whitespace().next())
        .unwrap_or("User")
}

/// A project summary: title, description, task counts and progress.
pub fn project_card(project: &Project) -> String {
    let progress = project.progress();
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", project.id, project.title);
    if let Some(description) = &project.description {
        let _ = writeln!(out, "    {description}");
    }
    let _ = writeln!(
        out,
        "    {}/{} tasks  {}",
        progress.completed,
        progress.total,
        progress_bar(progress.percentage)
    );
    let _ = writeln!(out, "    Created {}", date(project.created_at.date()));
    out
}

/// One task line, with details indented below it.
pub fn task_line(task: &Task, today: NaiveDate) -> String {
    let mark = if task.completed { 'x' } else { ' ' };
    let mut out = format!("  [{mark}] #{} {}", task.id, task.title);
    if task.is_overdue(today) {
        out.push_str("  (overdue)");
    }
    out.push('\n');
    if let Some(description) = &task.description {
        let _ = writeln!(out, "      {description}");
    }
    let _ = writeln!(out, "      Due {}", date(task.due_date));
    out
}

/// The dashboard overview.
pub fn overview(user: Option<&User>, stats: &TotalStats, projects: &[Project]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Welcome back, {}!", first_name(user));
    let _ = writeln!(out, "Here's what's happening with your projects today.\n");

    for (label, value) in [
        ("Total Projects", stats.total_projects.to_string()),
        ("Total Tasks", stats.total_tasks.to_string()),
        ("Completed Tasks", stats.completed_tasks.to_string()),
        ("Completion Rate", format!("{}%", stats.completion_rate())),
    ] {
        let _ = writeln!(out, "  {label:<16} {value:>6}");
    }

    let _ = writeln!(out, "\nRecent Projects");
    if projects.is_empty() {
        let _ = writeln!(out, "  Create your first project to get started");
    }
    for project in projects.iter().take(RECENT_PROJECTS) {
        out.push_str(&project_card(project));
    }
    out
}

/// All projects as cards.
pub fn project_list(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects yet. Create your first project to get started.\n".to_string();
    }
    projects
        .iter()
        .map(project_card)
        .collect::<Vec<_>>()
        .join("\n")
}

/// A project with its pending and completed tasks.
pub fn project_details(project: &Project, today: NaiveDate) -> String {
    let progress = project.progress();
    let mut out = String::new();
    let _ = writeln!(out, "{}", project.title);
    let _ = writeln!(
        out,
        "{}",
        project
            .description
            .as_deref()
            .unwrap_or("No description provided")
    );
    let _ = writeln!(
        out,
        "\nProgress {}  ({} of {} tasks completed)",
        progress_bar(progress.percentage),
        progress.completed,
        progress.total
    );

    let pending: Vec<&Task> = project.pending_tasks().collect();
    let done: Vec<&Task> = project.done_tasks().collect();

    let _ = writeln!(out, "\nPending Tasks ({})", pending.len());
    if pending.is_empty() {
        let _ = writeln!(out, "  No pending tasks");
    }
    for task in pending {
        out.push_str(&task_line(task, today));
    }

    let _ = writeln!(out, "\nCompleted Tasks ({})", done.len());
    if done.is_empty() {
        let _ = writeln!(out, "  No completed tasks yet");
    }
    for task in done {
        out.push_str(&task_line(task, today));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn sample() -> Project {
        let created = day(1, 1).and_hms_opt(9, 0, 0).unwrap();
        Project::new(4, "Website", created)
            .with_description("Relaunch")
            .with_tasks(vec![
                Task::new(1, 4, "Mockups", day(2, 1), created).with_completed(true),
                Task::new(2, 4, "Build", day(3, 1), created).with_description("All pages"),
            ])
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0), "[----------] 0%");
        assert_eq!(progress_bar(50), "[#####-----] 50%");
        assert_eq!(progress_bar(67), "[#######---] 67%");
        assert_eq!(progress_bar(100), "[##########] 100%");
    }

    #[test]
    fn test_first_name() {
        let user = User::new("1", "ada@example.com", "Ada Lovelace");
        assert_eq!(first_name(Some(&user)), "Ada");
        assert_eq!(first_name(None), "User");
        let blank = User::new("1", "x@example.com", " ");
        assert_eq!(first_name(Some(&blank)), "User");
    }

    #[test]
    fn test_project_card() {
        let card = project_card(&sample());
        assert!(card.starts_with("#4 Website\n    Relaunch\n"));
        assert!(card.contains("1/2 tasks  [#####-----] 50%"));
        assert!(card.contains("Created Jan 1, 2024"));
    }

    #[test]
    fn test_details_split_tasks() {
        let text = project_details(&sample(), day(3, 5));

        let pending = text.find("Pending Tasks (1)").unwrap();
        let done = text.find("Completed Tasks (1)").unwrap();
        let build = text.find("#2 Build  (overdue)").unwrap();
        let mockups = text.find("[x] #1 Mockups").unwrap();
        assert!(pending < build && build < done && done < mockups);
        assert!(text.contains("All pages"));
    }

    #[test]
    fn test_overview_shows_three_recent_projects() {
        let projects: Vec<Project> = (1..=5)
            .map(|i| Project::new(i, format!("P{i}"), day(1, 1).and_hms_opt(0, 0, 0).unwrap()))
            .collect();
        let stats = TotalStats::from_projects(&projects);

        let text = overview(None, &stats, &projects);
        assert!(text.starts_with("Welcome back, User!"));
        assert!(text.contains("Completion Rate"));
        assert!(text.contains("#3 P3"));
        assert!(!text.contains("#4 P4"));
    }

    #[test]
    fn test_empty_views() {
        assert!(project_list(&[]).contains("Create your first project"));
        let empty = Project::new(1, "Empty", day(1, 1).and_hms_opt(0, 0, 0).unwrap());
        let text = project_details(&empty, day(1, 2));
        assert!(text.contains("No description provided"));
        assert!(text.contains("[----------] 0%"));
        assert!(text.contains("No pending tasks"));
    }
}
