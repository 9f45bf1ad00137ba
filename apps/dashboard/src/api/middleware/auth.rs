use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::api::errors::ApiError;
use crate::auth::gate::AccessDecision;
use crate::dashboard::Dashboard;
use crate::domain::user::User;
use crate::routes::Page;

/// Runs the gate for `page` and turns a refusal into an API error
///
/// Redirects become 401 (an API caller cannot follow them into a login
/// form); denials become 403 naming the required roles.
pub async fn authorize_page(dashboard: &Dashboard, page: Page) -> Result<User, ApiError> {
    let session = dashboard.session().await;

    match page.protected().decide(&session, page.path()) {
        AccessDecision::Render => session
            .user()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Not signed in")),
        AccessDecision::Redirect(_) => Err(ApiError::unauthorized("Not signed in")),
        AccessDecision::Denied(denied) => {
            let required: Vec<&str> = denied.required_roles.iter().map(|r| r.as_str()).collect();
            Err(ApiError::forbidden(format!(
                "Access denied. Required role(s): {}",
                required.join(", ")
            )))
        }
    }
}

/// Extractor for endpoints that need any signed-in user
///
/// Usage:
/// ```rust,ignore
/// async fn handler(CurrentUser(user): CurrentUser) -> String {
///     format!("Hello {}", user.name)
/// }
/// ```
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<Dashboard> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        dashboard: &Dashboard,
    ) -> Result<Self, Self::Rejection> {
        authorize_page(dashboard, Page::Dashboard).await.map(CurrentUser)
    }
}

/// Extractor for user management endpoints (Admin or Manager)
pub struct UserAdmin(pub User);

#[async_trait]
impl FromRequestParts<Dashboard> for UserAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        dashboard: &Dashboard,
    ) -> Result<Self, Self::Rejection> {
        authorize_page(dashboard, Page::Users).await.map(UserAdmin)
    }
}
