use serde::Serialize;

use crate::domain::repositories::{SessionStorage, StorageError, TOKEN_KEY, USER_KEY};
use crate::domain::user::{Role, User};

/// Actions understood by the auth store
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    LoginStart,
    LoginSuccess { user: User, token: String },
    LoginFailure(String),
    Logout,
    ClearError,
}

/// Coarse session status derived from [`AuthState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    Anonymous,
    Loading,
    Authenticated,
    Error,
}

/// Session state as views see it
///
/// # Invariants
/// - `is_authenticated` is true exactly when both `user` and `token` are set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    user: Option<User>,
    token: Option<String>,
    is_authenticated: bool,
    is_loading: bool,
    error: Option<String>,
}

impl AuthState {
    /// State for a session restored from storage
    pub fn authenticated(user: User, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
            is_loading: false,
            error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_role(&self) -> Option<&Role> {
        self.user.as_ref().map(|u| &u.role)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> AuthStatus {
        if self.is_loading {
            AuthStatus::Loading
        } else if self.is_authenticated {
            AuthStatus::Authenticated
        } else if self.error.is_some() {
            AuthStatus::Error
        } else {
            AuthStatus::Anonymous
        }
    }
}

/// Session state plus its persistence bridge
///
/// The only component that writes the `token`/`user` storage keys. While
/// authenticated the stored pair mirrors the in-memory state; otherwise both
/// keys are absent.
pub struct AuthStore {
    state: AuthState,
    storage: Box<dyn SessionStorage>,
}

impl AuthStore {
    /// Restores the session from storage
    ///
    /// Both keys must be present and the user must parse. Anything else
    /// starts anonymous and clears whatever was left behind.
    pub fn load(storage: Box<dyn SessionStorage>) -> Self {
        let mut store = Self {
            state: AuthState::default(),
            storage,
        };

        let token = store.read_key(TOKEN_KEY);
        let user = store.read_key(USER_KEY);

        match (token, user) {
            (Some(token), Some(user)) => match serde_json::from_str::<User>(&user) {
                Ok(user) => {
                    tracing::info!("Restored session for {}", user.email);
                    store.state = AuthState::authenticated(user, token);
                }
                Err(e) => {
                    tracing::warn!("Discarding stored session, user does not parse: {}", e);
                    store.clear_persisted();
                }
            },
            (None, None) => {}
            _ => {
                tracing::warn!("Discarding incomplete stored session");
                store.clear_persisted();
            }
        }

        store
    }

    /// Applies one action. Never fails.
    ///
    /// A login whose session cannot be saved ends in the error state with
    /// both keys removed, so storage never holds half a session.
    pub fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::LoginStart => {
                self.state.is_loading = true;
                self.state.error = None;
            }
            AuthAction::LoginSuccess { user, token } => match self.persist(&user, &token) {
                Ok(()) => self.state = AuthState::authenticated(user, token),
                Err(e) => {
                    tracing::error!("Failed to persist session for {}: {}", user.email, e);
                    self.clear_persisted();
                    self.state = AuthState {
                        error: Some(format!("Failed to save session: {}", e)),
                        ..AuthState::default()
                    };
                }
            },
            AuthAction::LoginFailure(message) => {
                self.state.is_loading = false;
                self.state.error = Some(message);
            }
            AuthAction::Logout => {
                self.state = AuthState::default();
                self.clear_persisted();
            }
            AuthAction::ClearError => self.state.error = None,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read session key {}: {}", key, e);
                None
            }
        }
    }

    /// Writes both keys; on error the caller must clear whatever landed
    fn persist(&mut self, user: &User, token: &str) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(user)?;
        self.storage.set(TOKEN_KEY, token)?;
        self.storage.set(USER_KEY, &user_json)
    }

    fn clear_persisted(&mut self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::error!("Failed to clear session key {}: {}", key, e);
            }
        }
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
