use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::middleware::CurrentUser;
use crate::dashboard::Dashboard;
use crate::domain::task::{Task, TaskPriority, TaskStatus};
use crate::store::EntityAction;

/// Request body for creating a task
///
/// `createdBy` is always the signed-in user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    pub project_id: String,
    pub assigned_to: String,
    pub due_date: NaiveDate,
}

/// Operation applied to every selected task
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum BulkOperation {
    Complete,
    #[serde(rename_all = "camelCase")]
    Assign { user_id: String },
    Delete,
}

#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    pub ids: Vec<String>,
    #[serde(flatten)]
    pub operation: BulkOperation,
}

#[derive(Debug, Serialize)]
pub struct BulkResponse {
    pub affected: usize,
}

fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{} is required", field)));
    }
    Ok(())
}

/// Create a new task
///
/// POST /api/tasks
pub async fn create_task(
    State(dashboard): State<Dashboard>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    require("Description", &req.description)?;
    require("Project", &req.project_id)?;
    require("Assignee", &req.assigned_to)?;

    let task = Task::new(
        req.title,
        req.description,
        req.status,
        req.priority,
        req.project_id,
        req.assigned_to,
        user.id,
        req.due_date,
    )
    .map_err(ApiError::bad_request)?;

    dashboard.dispatch(EntityAction::Add(task.clone())).await;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Replace a task by id
///
/// PUT /api/tasks
pub async fn update_task(
    State(dashboard): State<Dashboard>,
    _user: CurrentUser,
    Json(task): Json<Task>,
) -> Result<Json<Task>, ApiError> {
    require("Title", &task.title)?;

    dashboard
        .update(|store| {
            if !store.tasks().contains(&task.id) {
                return Err(ApiError::not_found("Task not found"));
            }
            store.dispatch(EntityAction::Update(task.clone()));
            Ok(())
        })
        .await?;

    Ok(Json(task))
}

/// Delete a task
///
/// DELETE /api/tasks/:id
pub async fn delete_task(
    State(dashboard): State<Dashboard>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    dashboard
        .update(|store| {
            if !store.tasks().contains(&id) {
                return Err(ApiError::not_found("Task not found"));
            }
            store.dispatch(EntityAction::<Task>::Delete(id));
            Ok(StatusCode::NO_CONTENT)
        })
        .await
}

/// Complete, reassign or delete several tasks at once
///
/// Unknown ids are skipped; `affected` counts the ones that matched.
///
/// POST /api/tasks/bulk
pub async fn bulk_update(
    State(dashboard): State<Dashboard>,
    _user: CurrentUser,
    Json(req): Json<BulkRequest>,
) -> Result<Json<BulkResponse>, ApiError> {
    if req.ids.is_empty() {
        return Err(ApiError::bad_request("No tasks selected"));
    }

    let affected = dashboard
        .update(|store| match &req.operation {
            BulkOperation::Complete => store.complete_many(&req.ids),
            BulkOperation::Assign { user_id } => store.assign_many(&req.ids, user_id),
            BulkOperation::Delete => store.delete_many(&req.ids),
        })
        .await;

    tracing::debug!("Bulk {:?} touched {} task(s)", req.operation, affected);
    Ok(Json(BulkResponse { affected }))
}
