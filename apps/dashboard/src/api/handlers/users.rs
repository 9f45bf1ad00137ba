use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::middleware::UserAdmin;
use crate::dashboard::Dashboard;
use crate::domain::user::{Email, Role, User};
use crate::store::{Action, EntityAction};

/// Request body for adding a user to the directory listing
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub avatar: String,
}

#[derive(Debug, Deserialize)]
pub struct RoleChangeRequest {
    pub role: Role,
}

/// Add a user
///
/// The record only lands in the users collection. It cannot sign in.
///
/// POST /api/users
pub async fn create_user(
    State(dashboard): State<Dashboard>,
    UserAdmin(admin): UserAdmin,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }
    let email = Email::new(&req.email).map_err(ApiError::bad_request)?;

    let user = User::new(req.name, email, req.role, req.avatar);
    tracing::info!("{} added user {}", admin.email, user.email);
    dashboard.dispatch(EntityAction::Add(user.clone())).await;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Replace a user by id
///
/// PUT /api/users
pub async fn update_user(
    State(dashboard): State<Dashboard>,
    _admin: UserAdmin,
    Json(user): Json<User>,
) -> Result<Json<User>, ApiError> {
    dashboard
        .update(|store| {
            if !store.users().contains(&user.id) {
                return Err(ApiError::not_found("User not found"));
            }
            store.dispatch(EntityAction::Update(user.clone()));
            Ok(())
        })
        .await?;

    Ok(Json(user))
}

/// Remove a user
///
/// Project memberships and task assignments that name the user are kept.
///
/// DELETE /api/users/:id
pub async fn delete_user(
    State(dashboard): State<Dashboard>,
    _admin: UserAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    dashboard
        .update(|store| {
            if !store.users().contains(&id) {
                return Err(ApiError::not_found("User not found"));
            }
            store.dispatch(EntityAction::<User>::Delete(id));
            Ok(StatusCode::NO_CONTENT)
        })
        .await
}

/// Change a user's role
///
/// PUT /api/users/:id/role
pub async fn change_role(
    State(dashboard): State<Dashboard>,
    UserAdmin(admin): UserAdmin,
    Path(id): Path<String>,
    Json(req): Json<RoleChangeRequest>,
) -> Result<Json<User>, ApiError> {
    let user = dashboard
        .update(|store| {
            if !store.users().contains(&id) {
                return Err(ApiError::not_found("User not found"));
            }
            store.dispatch(Action::UpdateUserRole {
                user_id: id.clone(),
                role: req.role,
            });
            store
                .users()
                .get(&id)
                .cloned()
                .ok_or_else(|| ApiError::not_found("User not found"))
        })
        .await?;

    tracing::info!("{} set role of {} to {}", admin.email, user.email, user.role);
    Ok(Json(user))
}
