/// Storage abstraction
///
/// Every persistence operation the API handlers need, expressed as one
/// object-safe async trait with two implementations selected by
/// dependency injection at process start:
///
/// - [`postgres::PgStore`]: the production store over a sqlx pool,
///   delegating to the model-level CRUD functions
/// - [`memory::MemStore`]: an in-process store with the same uniqueness
///   and cascade semantics, used by the test suite and when the server
///   runs without a database
///
/// Handlers depend only on `Arc<dyn Store>`; nothing in the request path
/// branches on which implementation is behind it.
///
/// # Error contract
///
/// - Uniqueness violations (duplicate email, duplicate tag name,
///   duplicate (user, board) or (task, tag) pair) surface as
///   [`StoreError::Conflict`]
/// - Broken references (adding a member to a missing board, tagging a
///   missing task) surface as [`StoreError::NotFound`]
/// - Everything else is [`StoreError::Database`]
///
/// Ownership-scoped lookups (`*_for_user`) return `Ok(None)` both for
/// records that do not exist and records the user cannot see, so
/// handlers cannot leak existence of other users' data.
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::board::{Board, CreateBoard};
use crate::models::board_member::{BoardMember, CreateBoardMember};
use crate::models::column::{BoardColumn, CreateColumn, UpdateColumn};
use crate::models::profile::UserProfile;
use crate::models::tag::Tag;
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::models::task_tag::{CreateTaskTag, TaskTag};
use crate::models::user::{CreateUser, User};

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Uniqueness violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing record or broken reference
    #[error("Not found: {0}")]
    NotFound(String),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                match db_err.code().as_deref() {
                    // unique_violation
                    Some("23505") => {
                        let constraint = db_err.constraint().unwrap_or_default();
                        if constraint.contains("email") {
                            StoreError::Conflict("Email already registered".to_string())
                        } else if constraint.contains("task_tags") {
                            StoreError::Conflict("Tag already assigned to this task".to_string())
                        } else if constraint.contains("board_members") {
                            StoreError::Conflict(
                                "User is already a member of this board".to_string(),
                            )
                        } else if constraint.contains("tags") {
                            StoreError::Conflict("Tag name already exists".to_string())
                        } else {
                            StoreError::Conflict(format!("Duplicate value ({})", constraint))
                        }
                    }
                    // foreign_key_violation
                    Some("23503") => {
                        StoreError::NotFound("Referenced resource does not exist".to_string())
                    }
                    _ => StoreError::Database(db_err.to_string()),
                }
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

/// The storage contract behind the API handlers
///
/// Creation inputs arrive pre-validated (non-empty titles, resolved
/// ownership); the store enforces only relational invariants.
#[async_trait]
pub trait Store: Send + Sync {
    /// Liveness probe for the health endpoint
    async fn ping(&self) -> StoreResult<()>;

    // --- users ---

    /// Creates a user; duplicate email is a conflict
    async fn create_user(&self, data: CreateUser) -> StoreResult<User>;

    /// Finds a user by ID
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Finds a user by email
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Finds a user by reset-token digest (expiry checked by caller)
    async fn find_user_by_reset_token_hash(&self, hash: &str) -> StoreResult<Option<User>>;

    /// Replaces the stored refresh-token digest (None invalidates)
    async fn set_refresh_token_hash(&self, user_id: Uuid, hash: Option<String>)
        -> StoreResult<()>;

    /// Stores a reset-token digest with its expiry
    async fn set_reset_token(
        &self,
        user_id: Uuid,
        hash: String,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Replaces the password hash, clearing reset and refresh state
    async fn update_password(&self, user_id: Uuid, password_hash: String) -> StoreResult<()>;

    // --- profiles ---

    /// Creates the 1:1 profile for a new user (xp=0, level=1)
    async fn create_profile(&self, user_id: Uuid) -> StoreResult<UserProfile>;

    /// Finds a user's profile
    async fn find_profile_by_user(&self, user_id: Uuid) -> StoreResult<Option<UserProfile>>;

    // --- boards ---

    /// Creates a board
    async fn create_board(&self, data: CreateBoard) -> StoreResult<Board>;

    /// Finds a board regardless of ownership (membership checks)
    async fn find_board(&self, id: Uuid) -> StoreResult<Option<Board>>;

    /// Finds a board scoped to its owner
    async fn find_board_owned(&self, id: Uuid, owner_id: Uuid) -> StoreResult<Option<Board>>;

    /// Lists boards owned by or shared with a user, oldest first
    async fn list_boards_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Board>>;

    /// Finds the owner's most-recently-created board
    async fn latest_board_for_owner(&self, owner_id: Uuid) -> StoreResult<Option<Board>>;

    /// Deletes an owned board; columns/tasks/memberships cascade
    async fn delete_board(&self, id: Uuid, owner_id: Uuid) -> StoreResult<bool>;

    // --- columns ---

    /// Creates a column
    async fn create_column(&self, data: CreateColumn) -> StoreResult<BoardColumn>;

    /// Lists a board's columns, position order
    async fn list_columns_for_board(&self, board_id: Uuid) -> StoreResult<Vec<BoardColumn>>;

    /// Lists every column in the user's boards, position order
    async fn list_columns_for_user(&self, user_id: Uuid) -> StoreResult<Vec<BoardColumn>>;

    /// Finds a column scoped to the board owner
    async fn find_column_for_user(&self, id: Uuid, user_id: Uuid)
        -> StoreResult<Option<BoardColumn>>;

    /// Partially updates an owned column
    async fn update_column(
        &self,
        id: Uuid,
        user_id: Uuid,
        data: UpdateColumn,
    ) -> StoreResult<Option<BoardColumn>>;

    /// Deletes an owned column; its tasks cascade
    async fn delete_column(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool>;

    /// Counts columns in a board
    async fn count_columns(&self, board_id: Uuid) -> StoreResult<i64>;

    // --- tasks ---

    /// Creates a task
    async fn create_task(&self, data: CreateTask) -> StoreResult<Task>;

    /// Lists every task in the user's boards, position order
    async fn list_tasks_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Task>>;

    /// Finds a task scoped to the board owner
    async fn find_task_for_user(&self, id: Uuid, user_id: Uuid) -> StoreResult<Option<Task>>;

    /// Partially updates an owned task
    async fn update_task(
        &self,
        id: Uuid,
        user_id: Uuid,
        data: UpdateTask,
    ) -> StoreResult<Option<Task>>;

    /// Deletes an owned task
    async fn delete_task(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool>;

    /// Counts tasks in a column
    async fn count_tasks_in_column(&self, column_id: Uuid) -> StoreResult<i64>;

    // --- tags ---

    /// Creates a tag; duplicate name is a conflict
    async fn create_tag(&self, name: &str) -> StoreResult<Tag>;

    /// Finds a tag by ID
    async fn find_tag(&self, id: Uuid) -> StoreResult<Option<Tag>>;

    /// Lists all tags, name order
    async fn list_tags(&self) -> StoreResult<Vec<Tag>>;

    // --- join records ---

    /// Adds a board membership; duplicate pair is a conflict, missing
    /// user/board is not-found
    async fn add_board_member(&self, data: CreateBoardMember) -> StoreResult<BoardMember>;

    /// Assigns a tag to a task; duplicate pair is a conflict, missing
    /// task/tag is not-found
    async fn add_task_tag(&self, data: CreateTaskTag) -> StoreResult<TaskTag>;
}
