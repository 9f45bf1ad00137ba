use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::middleware::CurrentUser;
use crate::dashboard::Dashboard;
use crate::domain::project::{Project, ProjectStatus};
use crate::store::EntityAction;

/// Request body for creating a project
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub progress: u8,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub team_members: Vec<String>,
}

/// Create a new project
///
/// POST /api/projects
pub async fn create_project(
    State(dashboard): State<Dashboard>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    if req.description.trim().is_empty() {
        return Err(ApiError::bad_request("Description is required"));
    }

    let project = Project::new(
        req.name,
        req.description,
        req.status,
        req.progress,
        req.deadline,
        req.team_members,
    )
    .map_err(ApiError::bad_request)?;

    tracing::info!("{} created project {}", user.email, project.id);
    dashboard.dispatch(EntityAction::Add(project.clone())).await;

    Ok((StatusCode::CREATED, Json(project)))
}

/// Replace a project by id
///
/// PUT /api/projects
pub async fn update_project(
    State(dashboard): State<Dashboard>,
    _user: CurrentUser,
    Json(project): Json<Project>,
) -> Result<Json<Project>, ApiError> {
    if project.name.trim().is_empty() {
        return Err(ApiError::bad_request("Project name cannot be empty"));
    }

    dashboard
        .update(|store| {
            if !store.projects().contains(&project.id) {
                return Err(ApiError::not_found("Project not found"));
            }
            store.dispatch(EntityAction::Update(project.clone()));
            Ok(())
        })
        .await?;

    Ok(Json(project))
}

/// Delete a project
///
/// Tasks that reference it are left in place.
///
/// DELETE /api/projects/:id
pub async fn delete_project(
    State(dashboard): State<Dashboard>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    dashboard
        .update(|store| {
            if !store.projects().contains(&id) {
                return Err(ApiError::not_found("Project not found"));
            }
            store.dispatch(EntityAction::<Project>::Delete(id));
            Ok(StatusCode::NO_CONTENT)
        })
        .await
}

/// Mark a project as the current selection
///
/// POST /api/projects/:id/select
pub async fn select_project(
    State(dashboard): State<Dashboard>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    dashboard
        .update(|store| {
            let project = store
                .projects()
                .get(&id)
                .cloned()
                .ok_or_else(|| ApiError::not_found("Project not found"))?;
            store.dispatch(EntityAction::<Project>::Select(id));
            Ok(Json(project))
        })
        .await
}
