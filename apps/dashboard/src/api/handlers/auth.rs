use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::auth::service::{LoginCredentials, RegisterData};
use crate::dashboard::Dashboard;
use crate::domain::user::{Email, User};
use crate::routes::return_path;
use crate::store::AuthState;

const MIN_PASSWORD_LEN: usize = 8;

/// Request body for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Page the visitor was bounced from, if any
    #[serde(default)]
    pub from: Option<String>,
}

/// Request body for user registration
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

/// Response from a successful login or registration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub user: User,
    pub redirect_to: String,
}

/// Login with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(dashboard): State<Dashboard>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    Email::new(&req.email).map_err(ApiError::bad_request)?;
    if req.password.is_empty() {
        return Err(ApiError::bad_request("Password is required"));
    }

    let grant = dashboard
        .login(LoginCredentials {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(SessionResponse {
        token: grant.token,
        user: grant.user,
        redirect_to: return_path(req.from.as_deref()),
    }))
}

/// Register a new user and sign in as them
///
/// POST /api/auth/register
pub async fn register(
    State(dashboard): State<Dashboard>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }
    Email::new(&req.email).map_err(ApiError::bad_request)?;
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(
            "Password must be at least 8 characters",
        ));
    }
    if let Some(confirm) = &req.confirm_password {
        if confirm != &req.password {
            return Err(ApiError::bad_request("Passwords don't match"));
        }
    }

    let grant = dashboard
        .register(RegisterData {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token: grant.token,
            user: grant.user,
            redirect_to: return_path(None),
        }),
    ))
}

/// Sign out and forget the persisted session
///
/// POST /api/auth/logout
pub async fn logout(State(dashboard): State<Dashboard>) -> StatusCode {
    dashboard.logout().await;
    StatusCode::NO_CONTENT
}

/// Current session state
///
/// GET /api/auth/session
pub async fn session(State(dashboard): State<Dashboard>) -> Json<AuthState> {
    Json(dashboard.session().await)
}

/// Dismiss the last login error
///
/// DELETE /api/auth/error
pub async fn clear_error(State(dashboard): State<Dashboard>) -> StatusCode {
    dashboard.clear_error().await;
    StatusCode::NO_CONTENT
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
