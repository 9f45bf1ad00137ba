use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::repositories::UserDirectory;
use crate::domain::user::User;

/// In-memory implementation of UserDirectory
///
/// Seeded from the bootstrap dataset. Accounts created through registration
/// are kept here only, the dataset itself is never modified.
pub struct InMemoryUserDirectory {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserDirectory {
    /// Creates a directory holding the given accounts
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, String> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email.matches(email)).cloned())
    }

    async fn create(&self, user: User) -> Result<String, String> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email.matches(user.email.as_str())) {
            return Err(format!("duplicate email: {}", user.email));
        }

        let id = user.id.clone();
        users.push(user);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Email, Role};

    fn user(email: &str) -> User {
        User::new("Test User", Email::new(email).unwrap(), Role::Employee, "")
    }

    #[tokio::test]
    async fn find_by_email_ignores_case() {
        let directory = InMemoryUserDirectory::new(vec![user("Jane@Example.com")]);

        let found = directory.find_by_email("jane@example.com").await.unwrap();
        assert!(found.is_some());

        let missing = directory.find_by_email("john@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn created_account_is_found() {
        let directory = InMemoryUserDirectory::new(vec![]);
        let new_user = user("new@example.com");
        let expected = new_user.id.clone();

        let id = directory.create(new_user).await.unwrap();
        assert_eq!(id, expected);
        let found = directory.find_by_email("new@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(expected));
    }

    #[tokio::test]
    async fn create_duplicate_email_fails() {
        let directory = InMemoryUserDirectory::new(vec![user("new@example.com")]);

        let result = directory.create(user("NEW@example.com")).await;
        assert!(result.unwrap_err().contains("duplicate"));
        assert_eq!(directory.users.read().await.len(), 1);
    }
}
