use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::jwt::create_token;
use crate::domain::repositories::UserDirectory;
use crate::domain::user::{Email, Role, User};

/// Latency the mock boundary adds to every call
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(800);

/// Errors surfaced by the authentication boundary
///
/// The display strings are what the login and register pages show.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already in use")]
    EmailInUse,

    #[error("{0}")]
    InvalidEmail(String),

    #[error("A sign-in request is already in progress")]
    InFlight,

    #[error("Failed to create token: {0}")]
    Token(String),

    #[error("User directory error: {0}")]
    Directory(String),

    #[error("{0}")]
    Storage(String),

    #[error("Sign-in did not complete: {0}")]
    Interrupted(String),
}

/// Login form payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Registration form payload
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterData {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful authentication result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthGrant {
    pub user: User,
    pub token: String,
}

/// Authentication boundary
///
/// Implemented by [`MockAuthService`] today. A real backend plugs in here
/// without touching the stores or the gate.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant, AuthError>;

    /// Creates an account. The caller adds the returned user to the users
    /// collection.
    async fn register(&self, data: &RegisterData) -> Result<AuthGrant, AuthError>;
}

/// Auth service resolving against an in-memory directory
///
/// Login succeeds for any known email (ignoring case) paired with any
/// non-empty password. Passwords are not checked beyond that.
pub struct MockAuthService {
    directory: Arc<dyn UserDirectory>,
    secret: String,
    latency: Duration,
}

impl MockAuthService {
    pub fn new(directory: Arc<dyn UserDirectory>, secret: impl Into<String>) -> Self {
        Self {
            directory,
            secret: secret.into(),
            latency: DEFAULT_LATENCY,
        }
    }

    /// Overrides the simulated network delay
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    async fn simulate_network(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn issue(&self, user: User) -> Result<AuthGrant, AuthError> {
        let token = create_token(&user.id, &self.secret).map_err(AuthError::Token)?;
        Ok(AuthGrant { user, token })
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant, AuthError> {
        self.simulate_network().await;

        let user = self
            .directory
            .find_by_email(&credentials.email)
            .await
            .map_err(AuthError::Directory)?;

        match user {
            Some(user) if !credentials.password.is_empty() => {
                tracing::info!("Login succeeded for {}", user.email);
                self.issue(user)
            }
            _ => {
                tracing::warn!("Login rejected for {}", credentials.email);
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    async fn register(&self, data: &RegisterData) -> Result<AuthGrant, AuthError> {
        self.simulate_network().await;

        let email = Email::new(&data.email).map_err(AuthError::InvalidEmail)?;

        let existing = self
            .directory
            .find_by_email(email.as_str())
            .await
            .map_err(AuthError::Directory)?;
        if existing.is_some() {
            return Err(AuthError::EmailInUse);
        }

        let user = User::new(data.name.clone(), email, Role::Employee, random_avatar());
        self.directory.create(user.clone()).await.map_err(|e| {
            if e.contains("duplicate") {
                AuthError::EmailInUse
            } else {
                AuthError::Directory(e)
            }
        })?;

        tracing::info!("Registered {} as {}", user.email, user.id);
        self.issue(user)
    }
}

fn random_avatar() -> String {
    let seed = Uuid::new_v4();
    let bytes = seed.as_bytes();
    let folder = if bytes[0] & 1 == 0 { "men" } else { "women" };
    format!(
        "https://randomuser.me/api/portraits/{}/{}.jpg",
        folder,
        bytes[1] % 100
    )
}
