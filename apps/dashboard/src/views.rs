//! Read-only view models built from store state
//!
//! Each page reads the store and never writes to it. These structs are what
//! the HTTP layer serializes.

use serde::{Deserialize, Serialize};

use crate::auth::gate::AccessDenied;
use crate::domain::project::{Project, ProjectStatus};
use crate::domain::task::{Task, TaskStatus};
use crate::domain::user::User;
use crate::store::Store;

/// How many avatars the dashboard team card shows
const TEAM_PREVIEW: usize = 5;

/// Task counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl TaskStatusCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut acc, task| {
            match task.status {
                TaskStatus::ToDo => acc.todo += 1,
                TaskStatus::InProgress => acc.in_progress += 1,
                TaskStatus::Completed => acc.completed += 1,
            }
            acc
        })
    }
}

/// Headline numbers for the dashboard page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub projects_in_progress: usize,
    pub total_tasks: usize,
    pub task_counts: TaskStatusCounts,
    /// Share of completed tasks, 0 when there are none
    pub completion_percent: u8,
    pub team_size: usize,
    pub team_preview: Vec<User>,
}

impl DashboardSummary {
    pub fn build(store: &Store) -> Self {
        let tasks = store.tasks().items();
        let projects = store.projects().items();
        let users = store.users().items();
        let task_counts = TaskStatusCounts::from_tasks(tasks);

        let completion_percent = if tasks.is_empty() {
            0
        } else {
            ((task_counts.completed * 100) / tasks.len()) as u8
        };

        Self {
            total_projects: projects.len(),
            projects_in_progress: projects
                .iter()
                .filter(|p| p.status == ProjectStatus::InProgress)
                .count(),
            total_tasks: tasks.len(),
            task_counts,
            completion_percent,
            team_size: users.len(),
            team_preview: users.iter().take(TEAM_PREVIEW).cloned().collect(),
        }
    }
}

/// A project with its members resolved to user records
///
/// Member ids that no longer resolve are left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    #[serde(flatten)]
    pub project: Project,
    pub members: Vec<User>,
    pub task_count: usize,
}

pub fn project_cards(store: &Store) -> Vec<ProjectCard> {
    store
        .projects()
        .items()
        .iter()
        .map(|project| ProjectCard {
            members: project
                .team_members()
                .iter()
                .filter_map(|id| store.users().get(id).cloned())
                .collect(),
            task_count: store
                .tasks()
                .items()
                .iter()
                .filter(|t| t.project_id == project.id)
                .count(),
            project: project.clone(),
        })
        .collect()
}

/// Tabs on the task page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskTab {
    #[default]
    All,
    Todo,
    InProgress,
    Completed,
}

impl TaskTab {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskTab::All => true,
            TaskTab::Todo => task.status == TaskStatus::ToDo,
            TaskTab::InProgress => task.status == TaskStatus::InProgress,
            TaskTab::Completed => task.status == TaskStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    pub tab: TaskTab,
    pub tasks: Vec<Task>,
    pub counts: TaskStatusCounts,
}

impl TaskList {
    pub fn build(store: &Store, tab: TaskTab) -> Self {
        let all = store.tasks().items();
        Self {
            tab,
            tasks: all.iter().filter(|t| tab.matches(t)).cloned().collect(),
            counts: TaskStatusCounts::from_tasks(all),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserList {
    pub users: Vec<User>,
}

impl UserList {
    pub fn build(store: &Store) -> Self {
        Self {
            users: store.users().items().to_vec(),
        }
    }
}

/// Profile shown on the settings page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsView {
    pub profile: Option<User>,
}

impl SettingsView {
    pub fn build(store: &Store) -> Self {
        Self {
            profile: store.auth().user().cloned(),
        }
    }
}

/// Body of the access-denied notice
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDeniedView {
    pub title: &'static str,
    pub message: &'static str,
    #[serde(flatten)]
    pub denied: AccessDenied,
}

impl From<AccessDenied> for AccessDeniedView {
    fn from(denied: AccessDenied) -> Self {
        Self {
            title: "Access Denied",
            message: "You don't have permission to access this page.",
            denied,
        }
    }
}
