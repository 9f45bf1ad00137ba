use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::value_objects::ProjectStatus;
use crate::domain::entity::Entity;

/// Upper bound for [`Project::progress`]
pub const MAX_PROGRESS: u8 = 100;

/// A project tracked on the dashboard
///
/// # Invariants
/// - Name cannot be empty (checked by [`Project::new`])
/// - Progress is within `0..=100`
/// - Team members hold no duplicate user ids
///
/// `progress` is entered by hand. It is not derived from the status of the
/// project's tasks.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use tasktrove_dashboard::domain::project::{Project, ProjectStatus};
///
/// let project = Project::new(
///     "Website redesign",
///     "New landing page",
///     ProjectStatus::Planning,
///     0,
///     NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
///     vec!["user-1".to_string(), "user-1".to_string()],
/// )
/// .expect("valid project");
///
/// assert_eq!(project.team_members(), ["user-1".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    #[serde(deserialize_with = "bounded_progress")]
    pub progress: u8,
    pub deadline: NaiveDate,
    #[serde(default, deserialize_with = "unique_members")]
    team_members: Vec<String>,
}

impl Project {
    /// Creates a new project with a generated id
    ///
    /// # Returns
    /// * `Ok(Project)` - With duplicate member ids dropped
    /// * `Err(String)` - If the name is empty or progress exceeds 100
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        status: ProjectStatus,
        progress: u8,
        deadline: NaiveDate,
        team_members: Vec<String>,
    ) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Project name cannot be empty".to_string());
        }
        if progress > MAX_PROGRESS {
            return Err(format!("Progress must be between 0 and {}", MAX_PROGRESS));
        }

        Ok(Self {
            id: crate::domain::new_id("project"),
            name,
            description: description.into(),
            status,
            progress,
            deadline,
            team_members: dedup(team_members),
        })
    }

    /// Returns the member ids in insertion order
    pub fn team_members(&self) -> &[String] {
        &self.team_members
    }
}

impl Entity for Project {
    const KIND: &'static str = "project";

    fn id(&self) -> &str {
        &self.id
    }
}

fn dedup(members: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(members.len());
    for member in members {
        if !unique.contains(&member) {
            unique.push(member);
        }
    }
    unique
}

fn unique_members<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<String>::deserialize(deserializer).map(dedup)
}

fn bounded_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let progress = u8::deserialize(deserializer)?;
    if progress > MAX_PROGRESS {
        return Err(serde::de::Error::custom(format!(
            "progress {} is out of range 0..={}",
            progress, MAX_PROGRESS
        )));
    }
    Ok(progress)
}
