use serde::{Deserialize, Serialize};

use super::value_objects::{Email, Role};
use crate::domain::entity::Entity;

/// A dashboard account
///
/// Owned by the users collection. Projects and tasks only hold its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub avatar: String,
}

impl User {
    /// Creates a user with a freshly generated id
    pub fn new(
        name: impl Into<String>,
        email: Email,
        role: Role,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            id: crate::domain::new_id("user"),
            name: name.into(),
            email,
            role,
            avatar: avatar.into(),
        }
    }
}

impl Entity for User {
    const KIND: &'static str = "user";

    fn id(&self) -> &str {
        &self.id
    }
}
