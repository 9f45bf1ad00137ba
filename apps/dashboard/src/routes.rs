//! Route composition
//!
//! Maps URL paths to pages and runs each protected page through the
//! authorization gate. Rendering is left to the caller.

use serde::Serialize;

use crate::auth::gate::{AccessDenied, Gated, LoginRedirect, Protected};
use crate::domain::user::Role;
use crate::store::AuthState;

/// Landing page after login when no origin was remembered
pub const DEFAULT_RETURN_PATH: &str = "/dashboard";

/// Every page the dashboard knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Login,
    Register,
    Dashboard,
    Projects,
    Tasks,
    Users,
    Settings,
    NotFound,
}

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Page::Login => "/auth/login",
            Page::Register => "/auth/register",
            Page::Dashboard => "/dashboard",
            Page::Projects => "/projects",
            Page::Tasks => "/tasks",
            Page::Users => "/users",
            Page::Settings => "/settings",
            Page::NotFound => "*",
        }
    }

    /// Roles allowed on the page; empty means any signed-in user
    pub fn required_roles(&self) -> Vec<Role> {
        match self {
            Page::Users => vec![Role::Admin, Role::Manager],
            _ => Vec::new(),
        }
    }

    /// Whether the page sits behind the gate at all
    pub fn is_protected(&self) -> bool {
        !matches!(self, Page::Login | Page::Register | Page::NotFound)
    }

    /// Wraps the page in the gate with its role requirements
    pub fn protected(self) -> Protected<Page> {
        Protected::new(self).require_roles(self.required_roles())
    }
}

/// What the router should do for a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Show(Page),
    /// Plain redirect with no login origin, e.g. `/` to `/dashboard`
    Forward(&'static str),
    Login(LoginRedirect),
    Denied { page: Page, denied: AccessDenied },
}

/// Resolves a path to a page, ignoring query string and trailing slash
pub fn resolve(path: &str) -> Option<Page> {
    let path = normalize(path);
    match path {
        "/auth/login" => Some(Page::Login),
        "/auth/register" => Some(Page::Register),
        "/dashboard" => Some(Page::Dashboard),
        "/projects" => Some(Page::Projects),
        "/tasks" => Some(Page::Tasks),
        "/users" => Some(Page::Users),
        "/settings" => Some(Page::Settings),
        _ => None,
    }
}

/// Decides what a visit to `path` shows under the current session
///
/// # Example
/// ```
/// use tasktrove_dashboard::routes::{navigate, Navigation};
/// use tasktrove_dashboard::store::AuthState;
///
/// match navigate("/tasks", &AuthState::default()) {
///     Navigation::Login(redirect) => {
///         assert_eq!(redirect.to, "/auth/login");
///         assert_eq!(redirect.from, "/tasks");
///     }
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub fn navigate(path: &str, session: &AuthState) -> Navigation {
    if normalize(path) == "/" {
        return Navigation::Forward(DEFAULT_RETURN_PATH);
    }

    let page = match resolve(path) {
        Some(page) => page,
        None => return Navigation::Show(Page::NotFound),
    };

    if !page.is_protected() {
        return Navigation::Show(page);
    }

    let gated = page.protected();
    match gated.evaluate(session, &origin(path)) {
        Gated::Render(page) => Navigation::Show(*page),
        Gated::Redirect(redirect) => Navigation::Login(redirect),
        Gated::Denied(denied) => Navigation::Denied { page, denied },
    }
}

/// Where to go after a successful login
///
/// Only known, protected pages are honoured, with their query string kept;
/// anything else falls back to the dashboard so a crafted `from` cannot
/// bounce the user off-site.
pub fn return_path(from: Option<&str>) -> String {
    match from {
        Some(from) if resolve(from).is_some_and(|page| page.is_protected()) => origin(from),
        _ => DEFAULT_RETURN_PATH.to_string(),
    }
}

/// Normalized path plus any query string, without the fragment
fn origin(path: &str) -> String {
    let without_fragment = path.split('#').next().unwrap_or("");
    match without_fragment.split_once('?') {
        Some((_, query)) if !query.is_empty() => format!("{}?{}", normalize(path), query),
        _ => normalize(path).to_string(),
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
