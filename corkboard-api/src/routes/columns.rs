/// Column endpoints
///
/// # Endpoints
///
/// - `GET    /api/columns` - All columns in the caller's boards
/// - `POST   /api/columns` - Create a column
/// - `PUT    /api/columns/:id` - Partial update
/// - `DELETE /api/columns/:id` - Delete a column (tasks cascade)
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
    models::column::{BoardColumn, CreateColumn, UpdateColumn},
};
use serde::Deserialize;
use uuid::Uuid;

/// Create column request
///
/// `order` is accepted as an alias of `position` for older clients. A
/// missing board falls back to the caller's most-recently-created board,
/// created on demand.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateColumnRequest {
    /// Column title
    pub title: Option<String>,

    /// Target board (optional, see fallback)
    pub board_id: Option<Uuid>,

    /// Display order
    pub position: Option<i32>,

    /// Legacy alias for position
    pub order: Option<i32>,
}

/// List all columns in the caller's boards, position order
pub async fn list_columns(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<BoardColumn>>> {
    let columns = state.store.list_columns_for_user(auth.user_id).await?;
    Ok(Json(columns))
}

/// Create a column
///
/// Without an explicit position the column is appended after the board's
/// existing columns.
///
/// # Errors
///
/// - `400 Bad Request`: missing title
/// - `404 Not Found`: boardId given but not owned by the caller
pub async fn create_column(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateColumnRequest>,
) -> ApiResult<(StatusCode, Json<BoardColumn>)> {
    let title = req
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("title is required".to_string()))?;

    let board = match req.board_id {
        Some(board_id) => state
            .store
            .find_board_owned(board_id, auth.user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Board not found".to_string()))?,
        None => super::boards::resolve_default_board(state.store.as_ref(), auth.user_id).await?,
    };

    let position = match req.position.or(req.order) {
        Some(position) => position,
        None => state.store.count_columns(board.id).await? as i32,
    };

    let column = state
        .store
        .create_column(CreateColumn {
            title,
            position,
            board_id: board.id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(column)))
}

/// Update column request (all fields optional)
///
/// `order` is accepted as an alias of `position`.
#[derive(Debug, Deserialize)]
pub struct UpdateColumnRequest {
    /// New title
    pub title: Option<String>,

    /// New display order
    pub position: Option<i32>,

    /// Legacy alias for position
    pub order: Option<i32>,
}

/// Partially update a column in one of the caller's boards
///
/// # Errors
///
/// - `404 Not Found`: unknown column, or not owned by the caller
pub async fn update_column(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateColumnRequest>,
) -> ApiResult<Json<BoardColumn>> {
    let column = state
        .store
        .update_column(
            id,
            auth.user_id,
            UpdateColumn {
                title: req.title,
                position: req.position.or(req.order),
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Column not found".to_string()))?;

    Ok(Json(column))
}

/// Delete a column in one of the caller's boards
///
/// # Errors
///
/// - `404 Not Found`: unknown column, or not owned by the caller
pub async fn delete_column(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = state.store.delete_column(id, auth.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Column not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
