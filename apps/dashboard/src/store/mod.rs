//! Centralized dashboard state
//!
//! One [`Store`] holds the auth session and the three entity collections.
//! Every change goes through [`Store::dispatch`] with a tagged [`Action`];
//! actions are applied one at a time, in order.

pub mod auth;
pub mod collection;
pub mod tasks;

pub use auth::{AuthAction, AuthState, AuthStatus, AuthStore};
pub use collection::{EntityAction, EntityStore};

use crate::domain::project::Project;
use crate::domain::repositories::SessionStorage;
use crate::domain::task::Task;
use crate::domain::user::{Role, User};
use crate::infrastructure::mock_data::Dataset;

/// Everything that can change dashboard state
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Projects(EntityAction<Project>),
    Tasks(EntityAction<Task>),
    Users(EntityAction<User>),
    /// Changes one user's role; unknown ids are ignored
    UpdateUserRole { user_id: String, role: Role },
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

impl From<EntityAction<Project>> for Action {
    fn from(action: EntityAction<Project>) -> Self {
        Action::Projects(action)
    }
}

impl From<EntityAction<Task>> for Action {
    fn from(action: EntityAction<Task>) -> Self {
        Action::Tasks(action)
    }
}

impl From<EntityAction<User>> for Action {
    fn from(action: EntityAction<User>) -> Self {
        Action::Users(action)
    }
}

/// Root state container
#[derive(Debug)]
pub struct Store {
    auth: AuthStore,
    projects: EntityStore<Project>,
    tasks: EntityStore<Task>,
    users: EntityStore<User>,
}

impl Store {
    /// Creates a store, restoring any persisted session
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self {
            auth: AuthStore::load(storage),
            projects: EntityStore::new(),
            tasks: EntityStore::new(),
            users: EntityStore::new(),
        }
    }

    /// Seeds every collection from a dataset, replacing current contents
    pub fn bootstrap(&mut self, dataset: &Dataset) {
        self.dispatch(EntityAction::<User>::FetchStart);
        self.dispatch(EntityAction::FetchSuccess(dataset.users.clone()));
        self.dispatch(EntityAction::<Project>::FetchStart);
        self.dispatch(EntityAction::FetchSuccess(dataset.projects.clone()));
        self.dispatch(EntityAction::<Task>::FetchStart);
        self.dispatch(EntityAction::FetchSuccess(dataset.tasks.clone()));

        tracing::info!(
            users = self.users.len(),
            projects = self.projects.len(),
            tasks = self.tasks.len(),
            "Store bootstrapped"
        );
    }

    pub fn dispatch(&mut self, action: impl Into<Action>) {
        match action.into() {
            Action::Auth(action) => self.auth.reduce(action),
            Action::Projects(action) => self.projects.reduce(action),
            Action::Tasks(action) => self.tasks.reduce(action),
            Action::Users(action) => self.users.reduce(action),
            Action::UpdateUserRole { user_id, role } => {
                if let Some(user) = self.users.get(&user_id) {
                    let mut updated = user.clone();
                    updated.role = role;
                    self.users.reduce(EntityAction::Update(updated));
                } else {
                    tracing::debug!("role change for unknown user {} ignored", user_id);
                }
            }
        }
    }

    pub fn auth(&self) -> &AuthState {
        self.auth.state()
    }

    pub fn projects(&self) -> &EntityStore<Project> {
        &self.projects
    }

    pub fn tasks(&self) -> &EntityStore<Task> {
        &self.tasks
    }

    pub fn users(&self) -> &EntityStore<User> {
        &self.users
    }
}
