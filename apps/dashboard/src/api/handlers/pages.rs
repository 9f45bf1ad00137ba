use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::errors::ApiError;
use crate::dashboard::Dashboard;
use crate::domain::project::Project;
use crate::routes::{navigate, Navigation, Page};
use crate::store::Store;
use crate::views::{
    project_cards, AccessDeniedView, DashboardSummary, ProjectCard, SettingsView, TaskList,
    TaskTab, UserList,
};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub tab: TaskTab,
    /// Where the login form returns to
    pub from: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectsView {
    pub projects: Vec<ProjectCard>,
    pub selected: Option<Project>,
}

/// Renders whatever page the request path names
///
/// Anonymous visitors to protected pages are sent to the login form with the
/// original location in `from`. Used for every page route and as the
/// fallback. A query string that does not parse is ignored.
pub async fn show(
    State(dashboard): State<Dashboard>,
    uri: Uri,
    query: Option<Query<PageQuery>>,
) -> Response {
    let location = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let query = query.map(|Query(query)| query).unwrap_or_default();

    dashboard
        .read(|store| match navigate(&location, store.auth()) {
            Navigation::Show(page) => render(store, page, &query),
            Navigation::Forward(to) => Redirect::to(to).into_response(),
            Navigation::Login(redirect) => {
                tracing::debug!("Sending anonymous visitor from {} to login", redirect.from);
                Redirect::to(&login_location(&redirect.to, &redirect.from)).into_response()
            }
            Navigation::Denied { page, denied } => {
                tracing::info!("Denied {:?} to role {:?}", page, denied.user_role);
                (StatusCode::FORBIDDEN, Json(AccessDeniedView::from(denied))).into_response()
            }
        })
        .await
}

/// Login form location carrying the encoded origin
fn login_location(to: &str, from: &str) -> String {
    match serde_urlencoded::to_string([("from", from)]) {
        Ok(query) => format!("{}?{}", to, query),
        Err(e) => {
            tracing::warn!("Dropping unencodable login origin {}: {}", from, e);
            to.to_string()
        }
    }
}

fn render(store: &Store, page: Page, query: &PageQuery) -> Response {
    match page {
        Page::Dashboard => Json(DashboardSummary::build(store)).into_response(),
        Page::Projects => Json(ProjectsView {
            projects: project_cards(store),
            selected: store.projects().selected().cloned(),
        })
        .into_response(),
        Page::Tasks => Json(TaskList::build(store, query.tab)).into_response(),
        Page::Users => Json(UserList::build(store)).into_response(),
        Page::Settings => Json(SettingsView::build(store)).into_response(),
        Page::Login | Page::Register => Json(json!({
            "page": page,
            "from": query.from,
            "isLoading": store.auth().is_loading(),
            "error": store.auth().error(),
        }))
        .into_response(),
        Page::NotFound => ApiError::not_found("Page not found").into_response(),
    }
}
