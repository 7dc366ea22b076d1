/// Board endpoints
///
/// # Endpoints
///
/// - `GET    /api/boards` - Boards owned by or shared with the caller
/// - `POST   /api/boards` - Create a board
/// - `DELETE /api/boards/:id` - Delete an owned board (columns/tasks cascade)
/// - `POST   /api/boards/:id/members` - Grant membership to another user
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
        board::{Board, CreateBoard},
        board_member::{BoardMember, BoardRole, CreateBoardMember},
        column::CreateColumn,
    },
    store::{Store, StoreError},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to boards created implicitly (registration, fallback)
pub(crate) const DEFAULT_BOARD_TITLE: &str = "My Kanban Board";

/// Seed columns for a fresh board, in position order
pub(crate) const SEED_COLUMNS: [&str; 3] = ["To Do", "In Progress", "Done"];

/// Response wrapper for board payloads
#[derive(Debug, Serialize)]
pub struct Data<T> {
    /// Wrapped payload
    pub data: T,
}

/// Create board request
///
/// `name` is accepted as an alias of `title` for older clients.
#[derive(Debug, Deserialize)]
pub struct CreateBoardRequest {
    /// Board title
    pub title: Option<String>,

    /// Legacy alias for title
    pub name: Option<String>,
}

/// Add member request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    /// User to add
    pub user_id: Option<Uuid>,

    /// Role to grant (defaults to member)
    pub role: Option<BoardRole>,
}

/// Creates a board with the three seed columns
///
/// Used at registration and by the default-board fallback on task/column
/// creation.
pub(crate) async fn create_default_board(
    store: &dyn Store,
    owner_id: Uuid,
) -> Result<Board, StoreError> {
    let board = store
        .create_board(CreateBoard {
            title: DEFAULT_BOARD_TITLE.to_string(),
            owner_id,
        })
        .await?;

    for (position, title) in SEED_COLUMNS.iter().enumerate() {
        store
            .create_column(CreateColumn {
                title: title.to_string(),
                position: position as i32,
                board_id: board.id,
            })
            .await?;
    }

    Ok(board)
}

/// Resolves the board targeted by a creation request with no explicit
/// board: the caller's most-recently-created board, created on demand
/// when none exists
pub(crate) async fn resolve_default_board(
    store: &dyn Store,
    owner_id: Uuid,
) -> Result<Board, StoreError> {
    match store.latest_board_for_owner(owner_id).await? {
        Some(board) => Ok(board),
        None => create_default_board(store, owner_id).await,
    }
}

/// List boards visible to the caller, oldest first
pub async fn list_boards(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Data<Vec<Board>>>> {
    let boards = state.store.list_boards_for_user(auth.user_id).await?;
    Ok(Json(Data { data: boards }))
}

/// Create a board owned by the caller
///
/// # Errors
///
/// - `400 Bad Request`: missing title
pub async fn create_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateBoardRequest>,
) -> ApiResult<(StatusCode, Json<Data<Board>>)> {
    let title = req
        .title
        .or(req.name)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("title (or name) is required".to_string()))?;

    let board = state
        .store
        .create_board(CreateBoard {
            title,
            owner_id: auth.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(Data { data: board })))
}

/// Delete an owned board
///
/// Columns, their tasks, and membership records cascade.
///
/// # Errors
///
/// - `404 Not Found`: unknown board, or not owned by the caller
pub async fn delete_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = state.store.delete_board(id, auth.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Board not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Grant a user membership of an owned board
///
/// # Errors
///
/// - `400 Bad Request`: missing userId
/// - `404 Not Found`: board not owned by caller, or user unknown
/// - `409 Conflict`: the (user, board) pair already exists
pub async fn add_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(board_id): Path<Uuid>,
    Json(req): Json<AddMemberRequest>,
) -> ApiResult<(StatusCode, Json<Data<BoardMember>>)> {
    let user_id = req
        .user_id
        .ok_or_else(|| ApiError::Validation("userId is required".to_string()))?;

    state
        .store
        .find_board_owned(board_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Board not found".to_string()))?;

    state
        .store
        .find_user_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let member = state
        .store
        .add_board_member(CreateBoardMember {
            user_id,
            board_id,
            role: req.role.unwrap_or(BoardRole::Member),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(Data { data: member })))
}
