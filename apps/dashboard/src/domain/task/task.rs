use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::value_objects::{TaskPriority, TaskStatus};
use crate::domain::entity::Entity;

/// A unit of work inside a project
///
/// `project_id`, `assigned_to` and `created_by` are non-owning references.
/// They are not checked on write and may point at deleted records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub project_id: String,
    pub assigned_to: String,
    pub created_by: String,
    pub due_date: NaiveDate,
}

impl Task {
    /// Creates a task with a generated id
    ///
    /// # Returns
    /// * `Err(String)` - If the title is empty
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: TaskStatus,
        priority: TaskPriority,
        project_id: impl Into<String>,
        assigned_to: impl Into<String>,
        created_by: impl Into<String>,
        due_date: NaiveDate,
    ) -> Result<Self, String> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err("Task title cannot be empty".to_string());
        }

        Ok(Self {
            id: crate::domain::new_id("task"),
            title,
            description: description.into(),
            status,
            priority,
            project_id: project_id.into(),
            assigned_to: assigned_to.into(),
            created_by: created_by.into(),
            due_date,
        })
    }
}

impl Entity for Task {
    const KIND: &'static str = "task";

    fn id(&self) -> &str {
        &self.id
    }
}
