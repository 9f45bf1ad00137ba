use async_trait::async_trait;

use crate::domain::user::User;

/// Account lookup used by the auth service
///
/// Separate from the users entity store: the directory is what the
/// authentication boundary knows about, the store is what the dashboard
/// currently shows.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by email, ignoring ASCII case
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, String>;

    /// Record a new account
    ///
    /// Fails if another account already uses the same email.
    async fn create(&self, user: User) -> Result<String, String>;
}
