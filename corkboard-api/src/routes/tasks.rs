/// Task endpoints
///
/// # Endpoints
///
/// - `GET    /api/tasks` - All tasks in the caller's boards
/// - `POST   /api/tasks` - Create a task
/// - `GET    /api/tasks/:id` - Fetch one task
/// - `PUT    /api/tasks/:id` - Partial update
/// - `DELETE /api/tasks/:id` - Delete a task
/// - `POST   /api/tasks/:id/tags` - Assign a tag
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use corkboard_shared::{
    auth::middleware::AuthContext,
    models::{
        task::{CreateTask, Task, UpdateTask},
        task_tag::{CreateTaskTag, TaskTag},
    },
};
use serde::Deserialize;
use uuid::Uuid;

use super::boards::Data;

/// Create task request
///
/// Without a column the task lands in the first column of the caller's
/// most-recently-created board (created on demand).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task title
    pub title: Option<String>,

    /// Optional description
    pub description: Option<String>,

    /// Target column (optional, see fallback)
    pub column_id: Option<Uuid>,

    /// Completion flag (defaults to false)
    pub completed: Option<bool>,
}

/// Update task request (all fields optional)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New completion flag
    pub completed: Option<bool>,

    /// New display order
    pub position: Option<i32>,

    /// Move to another column
    pub column_id: Option<Uuid>,
}

/// Assign tag request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTagRequest {
    /// Tag to assign
    pub tag_id: Option<Uuid>,
}

/// List all tasks in the caller's boards, position order
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.store.list_tasks_for_user(auth.user_id).await?;
    Ok(Json(tasks))
}

/// Fetch one task
///
/// # Errors
///
/// - `404 Not Found`: unknown task, or not owned by the caller
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = state
        .store
        .find_task_for_user(id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Create a task
///
/// New tasks are appended after the column's existing tasks; the first
/// task in a column gets position 0.
///
/// # Errors
///
/// - `400 Bad Request`: missing title
/// - `404 Not Found`: columnId given but not owned by the caller
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let title = req
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("title is required".to_string()))?;

    let column_id = match req.column_id {
        Some(column_id) => {
            state
                .store
                .find_column_for_user(column_id, auth.user_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Column not found".to_string()))?;
            column_id
        }
        None => {
            let board =
                super::boards::resolve_default_board(state.store.as_ref(), auth.user_id).await?;
            let columns = state.store.list_columns_for_board(board.id).await?;
            columns
                .first()
                .map(|c| c.id)
                .ok_or_else(|| ApiError::NotFound("Board has no columns".to_string()))?
        }
    };

    let position = state.store.count_tasks_in_column(column_id).await? as i32;

    let task = state
        .store
        .create_task(CreateTask {
            title,
            description: req.description,
            completed: req.completed.unwrap_or(false),
            position,
            column_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Partially update a task
///
/// Only fields present in the body change; a target column, when given,
/// must be owned by the caller.
///
/// # Errors
///
/// - `404 Not Found`: unknown task or column, or not owned by the caller
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    if let Some(column_id) = req.column_id {
        state
            .store
            .find_column_for_user(column_id, auth.user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Column not found".to_string()))?;
    }

    let task = state
        .store
        .update_task(
            id,
            auth.user_id,
            UpdateTask {
                title: req.title,
                description: req.description,
                completed: req.completed,
                position: req.position,
                column_id: req.column_id,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Delete a task
///
/// # Errors
///
/// - `404 Not Found`: unknown task, or not owned by the caller
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = state.store.delete_task(id, auth.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Assign a tag to a task
///
/// # Errors
///
/// - `400 Bad Request`: missing tagId
/// - `404 Not Found`: task not owned by caller, or tag unknown
/// - `409 Conflict`: the (task, tag) pair already exists
pub async fn add_tag(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<AddTagRequest>,
) -> ApiResult<(StatusCode, Json<Data<TaskTag>>)> {
    let tag_id = req
        .tag_id
        .ok_or_else(|| ApiError::Validation("tagId is required".to_string()))?;

    state
        .store
        .find_task_for_user(task_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    state
        .store
        .find_tag(tag_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tag not found".to_string()))?;

    let task_tag = state
        .store
        .add_task_tag(CreateTaskTag { task_id, tag_id })
        .await?;

    Ok((StatusCode::CREATED, Json(Data { data: task_tag })))
}
