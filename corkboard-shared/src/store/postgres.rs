/// PostgreSQL store implementation
///
/// Thin delegation to the model-level sqlx CRUD functions. Constraint
/// violations are translated into the store error contract by the
/// `From<sqlx::Error>` impl on [`StoreError`]; referential integrity on
/// deletion comes from the `ON DELETE CASCADE` rules in the schema.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::db::pool;
use crate::models::board::{Board, CreateBoard};
use crate::models::board_member::{BoardMember, CreateBoardMember};
use crate::models::column::{BoardColumn, CreateColumn, UpdateColumn};
use crate::models::profile::UserProfile;
use crate::models::tag::Tag;
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::models::task_tag::{CreateTaskTag, TaskTag};
use crate::models::user::{CreateUser, User};

/// Production store over a sqlx connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Creates a store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Accesses the underlying pool (migrations, shutdown)
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        pool::probe(&self.pool).await.map_err(StoreError::from)
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        Ok(User::create(&self.pool, data).await?)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn find_user_by_reset_token_hash(&self, hash: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_reset_token_hash(&self.pool, hash).await?)
    }

    async fn set_refresh_token_hash(
        &self,
        user_id: Uuid,
        hash: Option<String>,
    ) -> StoreResult<()> {
        User::set_refresh_token_hash(&self.pool, user_id, hash.as_deref()).await?;
        Ok(())
    }

    async fn set_reset_token(
        &self,
        user_id: Uuid,
        hash: String,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        User::set_reset_token(&self.pool, user_id, &hash, expires_at).await?;
        Ok(())
    }

    async fn update_password(&self, user_id: Uuid, password_hash: String) -> StoreResult<()> {
        User::update_password(&self.pool, user_id, &password_hash).await?;
        Ok(())
    }

    async fn create_profile(&self, user_id: Uuid) -> StoreResult<UserProfile> {
        Ok(UserProfile::create(&self.pool, user_id).await?)
    }

    async fn find_profile_by_user(&self, user_id: Uuid) -> StoreResult<Option<UserProfile>> {
        Ok(UserProfile::find_by_user(&self.pool, user_id).await?)
    }

    async fn create_board(&self, data: CreateBoard) -> StoreResult<Board> {
        Ok(Board::create(&self.pool, data).await?)
    }

    async fn find_board(&self, id: Uuid) -> StoreResult<Option<Board>> {
        Ok(Board::find_by_id(&self.pool, id).await?)
    }

    async fn find_board_owned(&self, id: Uuid, owner_id: Uuid) -> StoreResult<Option<Board>> {
        Ok(Board::find_owned(&self.pool, id, owner_id).await?)
    }

    async fn list_boards_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Board>> {
        Ok(Board::list_for_user(&self.pool, user_id).await?)
    }

    async fn latest_board_for_owner(&self, owner_id: Uuid) -> StoreResult<Option<Board>> {
        Ok(Board::latest_for_owner(&self.pool, owner_id).await?)
    }

    async fn delete_board(&self, id: Uuid, owner_id: Uuid) -> StoreResult<bool> {
        Ok(Board::delete_owned(&self.pool, id, owner_id).await?)
    }

    async fn create_column(&self, data: CreateColumn) -> StoreResult<BoardColumn> {
        Ok(BoardColumn::create(&self.pool, data).await?)
    }

    async fn list_columns_for_board(&self, board_id: Uuid) -> StoreResult<Vec<BoardColumn>> {
        Ok(BoardColumn::list_for_board(&self.pool, board_id).await?)
    }

    async fn list_columns_for_user(&self, user_id: Uuid) -> StoreResult<Vec<BoardColumn>> {
        Ok(BoardColumn::list_for_user(&self.pool, user_id).await?)
    }

    async fn find_column_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<BoardColumn>> {
        Ok(BoardColumn::find_for_user(&self.pool, id, user_id).await?)
    }

    async fn update_column(
        &self,
        id: Uuid,
        user_id: Uuid,
        data: UpdateColumn,
    ) -> StoreResult<Option<BoardColumn>> {
        Ok(BoardColumn::update_for_user(&self.pool, id, user_id, data).await?)
    }

    async fn delete_column(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        Ok(BoardColumn::delete_for_user(&self.pool, id, user_id).await?)
    }

    async fn count_columns(&self, board_id: Uuid) -> StoreResult<i64> {
        Ok(BoardColumn::count_for_board(&self.pool, board_id).await?)
    }

    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        Ok(Task::create(&self.pool, data).await?)
    }

    async fn list_tasks_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Task>> {
        Ok(Task::list_for_user(&self.pool, user_id).await?)
    }

    async fn find_task_for_user(&self, id: Uuid, user_id: Uuid) -> StoreResult<Option<Task>> {
        Ok(Task::find_for_user(&self.pool, id, user_id).await?)
    }

    async fn update_task(
        &self,
        id: Uuid,
        user_id: Uuid,
        data: UpdateTask,
    ) -> StoreResult<Option<Task>> {
        Ok(Task::update_for_user(&self.pool, id, user_id, data).await?)
    }

    async fn delete_task(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        Ok(Task::delete_for_user(&self.pool, id, user_id).await?)
    }

    async fn count_tasks_in_column(&self, column_id: Uuid) -> StoreResult<i64> {
        Ok(Task::count_for_column(&self.pool, column_id).await?)
    }

    async fn create_tag(&self, name: &str) -> StoreResult<Tag> {
        Ok(Tag::create(&self.pool, name).await?)
    }

    async fn find_tag(&self, id: Uuid) -> StoreResult<Option<Tag>> {
        Ok(Tag::find_by_id(&self.pool, id).await?)
    }

    async fn list_tags(&self) -> StoreResult<Vec<Tag>> {
        Ok(Tag::list(&self.pool).await?)
    }

    async fn add_board_member(&self, data: CreateBoardMember) -> StoreResult<BoardMember> {
        Ok(BoardMember::create(&self.pool, data).await?)
    }

    async fn add_task_tag(&self, data: CreateTaskTag) -> StoreResult<TaskTag> {
        Ok(TaskTag::create(&self.pool, data).await?)
    }
}
