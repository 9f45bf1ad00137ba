// Domain layer module exports
// Plain data types and their invariants, independent of storage and transport

pub mod entity;
pub mod project;
pub mod repositories;
pub mod task;
pub mod user;

use uuid::Uuid;

/// Generates an entity id of the form `<kind>-<uuid>`
///
/// # Example
/// ```
/// use tasktrove_dashboard::domain::new_id;
///
/// let id = new_id("task");
/// assert!(id.starts_with("task-"));
/// ```
pub fn new_id(kind: &str) -> String {
    format!("{}-{}", kind, Uuid::new_v4())
}
