// Authorization gate
// Decides whether a protected view renders, redirects to login, or is denied

use serde::Serialize;

use crate::domain::user::Role;
use crate::store::AuthState;

/// Where unauthenticated visitors are sent
pub const LOGIN_PATH: &str = "/auth/login";

/// Redirect target plus the path to return to after login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRedirect {
    pub to: String,
    pub from: String,
}

/// Details shown on the access-denied notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDenied {
    pub user_role: Option<Role>,
    pub required_roles: Vec<Role>,
}

/// Result of running the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Render,
    Redirect(LoginRedirect),
    Denied(AccessDenied),
}

/// True when `user_role` is one of `required_roles`
///
/// A missing role never matches.
///
/// # Example
/// ```
/// use tasktrove_dashboard::auth::gate::validate_user_role;
/// use tasktrove_dashboard::domain::user::Role;
///
/// let required = [Role::Admin, Role::Manager];
/// assert!(validate_user_role(&required, Some(&Role::Manager)));
/// assert!(!validate_user_role(&required, Some(&Role::Employee)));
/// assert!(!validate_user_role(&required, None));
/// ```
pub fn validate_user_role(required_roles: &[Role], user_role: Option<&Role>) -> bool {
    match user_role {
        Some(role) => required_roles.contains(role),
        None => false,
    }
}

/// The gate's decision table
///
/// | authenticated | required roles | role matches | result   |
/// |---------------|----------------|--------------|----------|
/// | no            | any            | -            | redirect |
/// | yes           | empty          | -            | render   |
/// | yes           | non-empty      | yes          | render   |
/// | yes           | non-empty      | no           | denied   |
///
/// Pure: reads its inputs and nothing else.
pub fn authorize(
    is_authenticated: bool,
    user_role: Option<&Role>,
    required_roles: &[Role],
    from: &str,
) -> AccessDecision {
    if !is_authenticated {
        return AccessDecision::Redirect(LoginRedirect {
            to: LOGIN_PATH.to_string(),
            from: from.to_string(),
        });
    }

    if required_roles.is_empty() || validate_user_role(required_roles, user_role) {
        return AccessDecision::Render;
    }

    AccessDecision::Denied(AccessDenied {
        user_role: user_role.cloned(),
        required_roles: required_roles.to_vec(),
    })
}

/// A view that only renders once the gate lets it through
///
/// # Example
/// ```
/// use tasktrove_dashboard::auth::gate::{Gated, Protected};
/// use tasktrove_dashboard::domain::user::Role;
/// use tasktrove_dashboard::store::AuthState;
///
/// let users_page = Protected::new("users").require_roles([Role::Admin, Role::Manager]);
///
/// match users_page.evaluate(&AuthState::default(), "/users") {
///     Gated::Redirect(redirect) => assert_eq!(redirect.from, "/users"),
///     _ => panic!("anonymous visitors are redirected"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protected<V> {
    view: V,
    required_roles: Vec<Role>,
}

/// Outcome of [`Protected::evaluate`]
#[derive(Debug, PartialEq, Eq)]
pub enum Gated<'a, V> {
    Render(&'a V),
    Redirect(LoginRedirect),
    Denied(AccessDenied),
}

impl<V> Protected<V> {
    /// Wraps a view that only needs an authenticated session
    pub fn new(view: V) -> Self {
        Self {
            view,
            required_roles: Vec::new(),
        }
    }

    /// Restricts the view to the listed roles
    pub fn require_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.required_roles = roles.into_iter().collect();
        self
    }

    pub fn required_roles(&self) -> &[Role] {
        &self.required_roles
    }

    /// Runs the gate against the current session
    pub fn decide(&self, session: &AuthState, from: &str) -> AccessDecision {
        authorize(
            session.is_authenticated(),
            session.user_role(),
            &self.required_roles,
            from,
        )
    }

    /// Runs the gate and hands out the view only when it may render
    pub fn evaluate(&self, session: &AuthState, from: &str) -> Gated<'_, V> {
        match self.decide(session, from) {
            AccessDecision::Render => Gated::Render(&self.view),
            AccessDecision::Redirect(redirect) => Gated::Redirect(redirect),
            AccessDecision::Denied(denied) => Gated::Denied(denied),
        }
    }
}
