//! Shared dashboard handle
//!
//! Owns the store behind an async mutex and drives the login and register
//! flows against the auth service. Cloning is cheap; every clone sees the
//! same state.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::auth::service::{
    AuthError, AuthGrant, AuthService, LoginCredentials, MockAuthService, RegisterData,
};
use crate::config::Config;
use crate::domain::repositories::SessionStorage;
use crate::domain::user::User;
use crate::infrastructure::mock_data::{Dataset, DatasetError};
use crate::infrastructure::repositories::InMemoryUserDirectory;
use crate::infrastructure::storage::FileStorage;
use crate::store::{Action, AuthAction, AuthState, EntityAction, Store};

#[derive(Clone)]
pub struct Dashboard {
    store: Arc<Mutex<Store>>,
    auth: Arc<dyn AuthService>,
}

impl Dashboard {
    pub fn new(store: Store, auth: Arc<dyn AuthService>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            auth,
        }
    }

    /// Wires the mock backend: dataset, directory, auth service and store
    pub fn with_mock_backend(
        dataset: Dataset,
        storage: Box<dyn SessionStorage>,
        config: &Config,
    ) -> Self {
        let directory = Arc::new(InMemoryUserDirectory::new(dataset.users.clone()));
        let auth = MockAuthService::new(directory, config.token_secret.clone())
            .with_latency(config.login_delay);

        let mut store = Store::new(storage);
        store.bootstrap(&dataset);

        Self::new(store, Arc::new(auth))
    }

    /// Builds the dashboard described by `config`
    pub fn from_config(config: &Config) -> Result<Self, DatasetError> {
        let dataset = match &config.data_path {
            Some(path) => {
                tracing::info!("Loading dataset from {}", path.display());
                Dataset::from_path(path)?
            }
            None => Dataset::bundled()?,
        };
        let storage = FileStorage::open_or_reset(&config.session_file);

        Ok(Self::with_mock_backend(dataset, Box::new(storage), config))
    }

    /// Signs in
    ///
    /// Rejected with [`AuthError::InFlight`] while another login or
    /// registration is pending. The store lock is released during the
    /// network wait. Once issued, the request runs to completion on its own
    /// task even if the caller stops waiting.
    pub async fn login(&self, credentials: LoginCredentials) -> Result<AuthGrant, AuthError> {
        self.begin_request().await?;
        let dashboard = self.clone();
        let request = tokio::spawn(async move {
            let result = dashboard.auth.login(&credentials).await;
            dashboard.finish_request(result, false).await
        });
        self.join_request(request).await
    }

    /// Creates an account and signs in as it
    ///
    /// The new user is appended to the users collection.
    pub async fn register(&self, data: RegisterData) -> Result<AuthGrant, AuthError> {
        self.begin_request().await?;
        let dashboard = self.clone();
        let request = tokio::spawn(async move {
            let result = dashboard.auth.register(&data).await;
            dashboard.finish_request(result, true).await
        });
        self.join_request(request).await
    }

    pub async fn logout(&self) {
        let mut store = self.store.lock().await;
        if let Some(user) = store.auth().user() {
            tracing::info!("Logging out {}", user.email);
        }
        store.dispatch(AuthAction::Logout);
    }

    pub async fn clear_error(&self) {
        self.store.lock().await.dispatch(AuthAction::ClearError);
    }

    /// Snapshot of the session
    pub async fn session(&self) -> AuthState {
        self.store.lock().await.auth().clone()
    }

    /// The signed-in user, if any
    pub async fn current_user(&self) -> Option<User> {
        self.store.lock().await.auth().user().cloned()
    }

    pub async fn dispatch(&self, action: impl Into<Action>) {
        self.store.lock().await.dispatch(action);
    }

    /// Runs `f` against the store under the lock
    pub async fn read<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        let store = self.store.lock().await;
        f(&store)
    }

    /// Runs `f` with mutable access under the lock
    pub async fn update<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        let mut store = self.store.lock().await;
        f(&mut store)
    }

    async fn begin_request(&self) -> Result<(), AuthError> {
        let mut store = self.store.lock().await;
        if store.auth().is_loading() {
            tracing::warn!("Rejecting sign-in while another is pending");
            return Err(AuthError::InFlight);
        }
        store.dispatch(AuthAction::LoginStart);
        Ok(())
    }

    async fn finish_request(
        &self,
        result: Result<AuthGrant, AuthError>,
        add_user: bool,
    ) -> Result<AuthGrant, AuthError> {
        let mut store = self.store.lock().await;
        match result {
            Ok(grant) => {
                if add_user {
                    store.dispatch(EntityAction::Add(grant.user.clone()));
                }
                store.dispatch(AuthAction::LoginSuccess {
                    user: grant.user.clone(),
                    token: grant.token.clone(),
                });
                if !store.auth().is_authenticated() {
                    let message = store.auth().error().unwrap_or_default().to_string();
                    return Err(AuthError::Storage(message));
                }
                Ok(grant)
            }
            Err(e) => {
                store.dispatch(AuthAction::LoginFailure(e.to_string()));
                Err(e)
            }
        }
    }

    /// Waits for a spawned request; a task that died still releases the guard
    async fn join_request(
        &self,
        request: JoinHandle<Result<AuthGrant, AuthError>>,
    ) -> Result<AuthGrant, AuthError> {
        match request.await {
            Ok(result) => result,
            Err(e) => {
                let err = AuthError::Interrupted(e.to_string());
                self.store
                    .lock()
                    .await
                    .dispatch(AuthAction::LoginFailure(err.to_string()));
                Err(err)
            }
        }
    }
}
