// API layer module (adapters for controllers)
// The HTTP surface is a thin adapter over `Dashboard`

pub mod errors;
pub mod handlers;
pub mod middleware;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::dashboard::Dashboard;
use handlers::{auth, pages, projects, tasks, users};

/// Builds every route over one shared dashboard
pub fn router(dashboard: Dashboard) -> Router {
    Router::new()
        .route("/health", get(auth::health_check))
        // Pages
        .route("/", get(pages::show))
        .route("/dashboard", get(pages::show))
        .route("/projects", get(pages::show))
        .route("/tasks", get(pages::show))
        .route("/users", get(pages::show))
        .route("/settings", get(pages::show))
        .route("/auth/login", get(pages::show))
        .route("/auth/register", get(pages::show))
        // Session
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::session))
        .route("/api/auth/error", delete(auth::clear_error))
        // Projects
        .route(
            "/api/projects",
            post(projects::create_project).put(projects::update_project),
        )
        .route("/api/projects/:id", delete(projects::delete_project))
        .route("/api/projects/:id/select", post(projects::select_project))
        // Tasks
        .route(
            "/api/tasks",
            post(tasks::create_task).put(tasks::update_task),
        )
        .route("/api/tasks/bulk", post(tasks::bulk_update))
        .route("/api/tasks/:id", delete(tasks::delete_task))
        // Users
        .route(
            "/api/users",
            post(users::create_user).put(users::update_user),
        )
        .route("/api/users/:id", delete(users::delete_user))
        .route("/api/users/:id/role", put(users::change_role))
        .fallback(pages::show)
        .with_state(dashboard)
}
