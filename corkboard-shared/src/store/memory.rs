/// In-memory store implementation
///
/// Mirrors the relational semantics (uniqueness, broken-reference
/// detection, cascade deletion, ordering) over plain maps behind an
/// async `RwLock`. Used by the test suite and when the server runs
/// without a database.
///
/// A per-record insertion sequence stands in for the database's creation
/// timestamps when ordering, so results stay deterministic even when two
/// records share a wall-clock instant.
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::board::{Board, CreateBoard};
use crate::models::board_member::{BoardMember, CreateBoardMember};
use crate::models::column::{BoardColumn, CreateColumn, UpdateColumn};
use crate::models::profile::UserProfile;
use crate::models::tag::Tag;
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::models::task_tag::{CreateTaskTag, TaskTag};
use crate::models::user::{CreateUser, User, UserRole};

/// In-process store with relational semantics
#[derive(Default)]
pub struct MemStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    seq: u64,
    order: HashMap<Uuid, u64>,
    users: HashMap<Uuid, User>,
    profiles: HashMap<Uuid, UserProfile>,
    boards: HashMap<Uuid, Board>,
    columns: HashMap<Uuid, BoardColumn>,
    tasks: HashMap<Uuid, Task>,
    tags: HashMap<Uuid, Tag>,
    board_members: HashMap<Uuid, BoardMember>,
    task_tags: HashMap<Uuid, TaskTag>,
}

impl Inner {
    fn stamp(&mut self, id: Uuid) {
        self.seq += 1;
        self.order.insert(id, self.seq);
    }

    fn ord(&self, id: &Uuid) -> u64 {
        self.order.get(id).copied().unwrap_or(0)
    }

    fn owns_column(&self, column_id: &Uuid, user_id: &Uuid) -> bool {
        self.columns
            .get(column_id)
            .and_then(|c| self.boards.get(&c.board_id))
            .map(|b| b.owner_id == *user_id)
            .unwrap_or(false)
    }

    /// Removes a column's tasks and their tag assignments
    fn cascade_column(&mut self, column_id: Uuid) {
        let task_ids: Vec<Uuid> = self
            .tasks
            .values()
            .filter(|t| t.column_id == column_id)
            .map(|t| t.id)
            .collect();
        for task_id in task_ids {
            self.tasks.remove(&task_id);
            self.task_tags.retain(|_, tt| tt.task_id != task_id);
        }
    }
}

impl MemStore {
    /// Creates an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.email == data.email) {
            return Err(StoreError::Conflict("Email already registered".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: data.email,
            password_hash: data.password_hash,
            role: UserRole::Student,
            refresh_token_hash: None,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
        };
        inner.stamp(user.id);
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_reset_token_hash(&self, hash: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.reset_token_hash.as_deref() == Some(hash))
            .cloned())
    }

    async fn set_refresh_token_hash(
        &self,
        user_id: Uuid,
        hash: Option<String>,
    ) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(user) = inner.users.get_mut(&user_id) {
            user.refresh_token_hash = hash;
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn set_reset_token(
        &self,
        user_id: Uuid,
        hash: String,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(user) = inner.users.get_mut(&user_id) {
            user.reset_token_hash = Some(hash);
            user.reset_token_expires_at = Some(expires_at);
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_password(&self, user_id: Uuid, password_hash: String) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(user) = inner.users.get_mut(&user_id) {
            user.password_hash = password_hash;
            user.reset_token_hash = None;
            user.reset_token_expires_at = None;
            user.refresh_token_hash = None;
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn create_profile(&self, user_id: Uuid) -> StoreResult<UserProfile> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&user_id) {
            return Err(StoreError::NotFound("User does not exist".to_string()));
        }
        if inner.profiles.values().any(|p| p.user_id == user_id) {
            return Err(StoreError::Conflict("Profile already exists".to_string()));
        }

        let now = Utc::now();
        let profile = UserProfile {
            id: Uuid::new_v4(),
            xp: 0,
            level: 1,
            user_id,
            created_at: now,
            updated_at: now,
        };
        inner.stamp(profile.id);
        inner.profiles.insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn find_profile_by_user(&self, user_id: Uuid) -> StoreResult<Option<UserProfile>> {
        let inner = self.inner.read().await;
        Ok(inner.profiles.values().find(|p| p.user_id == user_id).cloned())
    }

    async fn create_board(&self, data: CreateBoard) -> StoreResult<Board> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&data.owner_id) {
            return Err(StoreError::NotFound("User does not exist".to_string()));
        }

        let now = Utc::now();
        let board = Board {
            id: Uuid::new_v4(),
            title: data.title,
            owner_id: data.owner_id,
            created_at: now,
            updated_at: now,
        };
        inner.stamp(board.id);
        inner.boards.insert(board.id, board.clone());
        Ok(board)
    }

    async fn find_board(&self, id: Uuid) -> StoreResult<Option<Board>> {
        Ok(self.inner.read().await.boards.get(&id).cloned())
    }

    async fn find_board_owned(&self, id: Uuid, owner_id: Uuid) -> StoreResult<Option<Board>> {
        let inner = self.inner.read().await;
        Ok(inner
            .boards
            .get(&id)
            .filter(|b| b.owner_id == owner_id)
            .cloned())
    }

    async fn list_boards_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Board>> {
        let inner = self.inner.read().await;
        let mut boards: Vec<Board> = inner
            .boards
            .values()
            .filter(|b| {
                b.owner_id == user_id
                    || inner
                        .board_members
                        .values()
                        .any(|m| m.board_id == b.id && m.user_id == user_id)
            })
            .cloned()
            .collect();
        boards.sort_by_key(|b| inner.ord(&b.id));
        Ok(boards)
    }

    async fn latest_board_for_owner(&self, owner_id: Uuid) -> StoreResult<Option<Board>> {
        let inner = self.inner.read().await;
        Ok(inner
            .boards
            .values()
            .filter(|b| b.owner_id == owner_id)
            .max_by_key(|b| inner.ord(&b.id))
            .cloned())
    }

    async fn delete_board(&self, id: Uuid, owner_id: Uuid) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;

        match inner.boards.get(&id) {
            Some(board) if board.owner_id == owner_id => {}
            _ => return Ok(false),
        }

        let column_ids: Vec<Uuid> = inner
            .columns
            .values()
            .filter(|c| c.board_id == id)
            .map(|c| c.id)
            .collect();
        for column_id in column_ids {
            inner.cascade_column(column_id);
            inner.columns.remove(&column_id);
        }
        inner.board_members.retain(|_, m| m.board_id != id);
        inner.boards.remove(&id);
        Ok(true)
    }

    async fn create_column(&self, data: CreateColumn) -> StoreResult<BoardColumn> {
        let mut inner = self.inner.write().await;

        if !inner.boards.contains_key(&data.board_id) {
            return Err(StoreError::NotFound("Board does not exist".to_string()));
        }

        let now = Utc::now();
        let column = BoardColumn {
            id: Uuid::new_v4(),
            title: data.title,
            position: data.position,
            board_id: data.board_id,
            created_at: now,
            updated_at: now,
        };
        inner.stamp(column.id);
        inner.columns.insert(column.id, column.clone());
        Ok(column)
    }

    async fn list_columns_for_board(&self, board_id: Uuid) -> StoreResult<Vec<BoardColumn>> {
        let inner = self.inner.read().await;
        let mut columns: Vec<BoardColumn> = inner
            .columns
            .values()
            .filter(|c| c.board_id == board_id)
            .cloned()
            .collect();
        columns.sort_by_key(|c| (c.position, inner.ord(&c.id)));
        Ok(columns)
    }

    async fn list_columns_for_user(&self, user_id: Uuid) -> StoreResult<Vec<BoardColumn>> {
        let inner = self.inner.read().await;
        let mut columns: Vec<BoardColumn> = inner
            .columns
            .values()
            .filter(|c| {
                inner
                    .boards
                    .get(&c.board_id)
                    .map(|b| b.owner_id == user_id)
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        columns.sort_by_key(|c| (c.position, inner.ord(&c.id)));
        Ok(columns)
    }

    async fn find_column_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<BoardColumn>> {
        let inner = self.inner.read().await;
        Ok(inner
            .columns
            .get(&id)
            .filter(|_| inner.owns_column(&id, &user_id))
            .cloned())
    }

    async fn update_column(
        &self,
        id: Uuid,
        user_id: Uuid,
        data: UpdateColumn,
    ) -> StoreResult<Option<BoardColumn>> {
        let mut inner = self.inner.write().await;

        if !inner.owns_column(&id, &user_id) {
            return Ok(None);
        }

        let column = match inner.columns.get_mut(&id) {
            Some(column) => column,
            None => return Ok(None),
        };
        if let Some(title) = data.title {
            column.title = title;
        }
        if let Some(position) = data.position {
            column.position = position;
        }
        column.updated_at = Utc::now();
        Ok(Some(column.clone()))
    }

    async fn delete_column(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;

        if !inner.owns_column(&id, &user_id) {
            return Ok(false);
        }

        inner.cascade_column(id);
        inner.columns.remove(&id);
        Ok(true)
    }

    async fn count_columns(&self, board_id: Uuid) -> StoreResult<i64> {
        let inner = self.inner.read().await;
        Ok(inner.columns.values().filter(|c| c.board_id == board_id).count() as i64)
    }

    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        let mut inner = self.inner.write().await;

        if !inner.columns.contains_key(&data.column_id) {
            return Err(StoreError::NotFound("Column does not exist".to_string()));
        }

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            completed: data.completed,
            position: data.position,
            column_id: data.column_id,
            created_at: now,
            updated_at: now,
        };
        inner.stamp(task.id);
        inner.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn list_tasks_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Task>> {
        let inner = self.inner.read().await;
        let mut tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|t| inner.owns_column(&t.column_id, &user_id))
            .cloned()
            .collect();
        tasks.sort_by_key(|t| (t.position, inner.ord(&t.id)));
        Ok(tasks)
    }

    async fn find_task_for_user(&self, id: Uuid, user_id: Uuid) -> StoreResult<Option<Task>> {
        let inner = self.inner.read().await;
        Ok(inner
            .tasks
            .get(&id)
            .filter(|t| inner.owns_column(&t.column_id, &user_id))
            .cloned())
    }

    async fn update_task(
        &self,
        id: Uuid,
        user_id: Uuid,
        data: UpdateTask,
    ) -> StoreResult<Option<Task>> {
        let mut inner = self.inner.write().await;

        let owned = inner
            .tasks
            .get(&id)
            .map(|t| inner.owns_column(&t.column_id, &user_id))
            .unwrap_or(false);
        if !owned {
            return Ok(None);
        }

        let task = match inner.tasks.get_mut(&id) {
            Some(task) => task,
            None => return Ok(None),
        };
        if let Some(title) = data.title {
            task.title = title;
        }
        if let Some(description) = data.description {
            task.description = Some(description);
        }
        if let Some(completed) = data.completed {
            task.completed = completed;
        }
        if let Some(position) = data.position {
            task.position = position;
        }
        if let Some(column_id) = data.column_id {
            task.column_id = column_id;
        }
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;

        let owned = inner
            .tasks
            .get(&id)
            .map(|t| inner.owns_column(&t.column_id, &user_id))
            .unwrap_or(false);
        if !owned {
            return Ok(false);
        }

        inner.tasks.remove(&id);
        inner.task_tags.retain(|_, tt| tt.task_id != id);
        Ok(true)
    }

    async fn count_tasks_in_column(&self, column_id: Uuid) -> StoreResult<i64> {
        let inner = self.inner.read().await;
        Ok(inner.tasks.values().filter(|t| t.column_id == column_id).count() as i64)
    }

    async fn create_tag(&self, name: &str) -> StoreResult<Tag> {
        let mut inner = self.inner.write().await;

        if inner.tags.values().any(|t| t.name == name) {
            return Err(StoreError::Conflict("Tag name already exists".to_string()));
        }

        let now = Utc::now();
        let tag = Tag {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.stamp(tag.id);
        inner.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn find_tag(&self, id: Uuid) -> StoreResult<Option<Tag>> {
        Ok(self.inner.read().await.tags.get(&id).cloned())
    }

    async fn list_tags(&self) -> StoreResult<Vec<Tag>> {
        let inner = self.inner.read().await;
        let mut tags: Vec<Tag> = inner.tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn add_board_member(&self, data: CreateBoardMember) -> StoreResult<BoardMember> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&data.user_id) {
            return Err(StoreError::NotFound("User does not exist".to_string()));
        }
        if !inner.boards.contains_key(&data.board_id) {
            return Err(StoreError::NotFound("Board does not exist".to_string()));
        }
        if inner
            .board_members
            .values()
            .any(|m| m.user_id == data.user_id && m.board_id == data.board_id)
        {
            return Err(StoreError::Conflict(
                "User is already a member of this board".to_string(),
            ));
        }

        let member = BoardMember {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            board_id: data.board_id,
            role: data.role,
            joined_at: Utc::now(),
        };
        inner.stamp(member.id);
        inner.board_members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn add_task_tag(&self, data: CreateTaskTag) -> StoreResult<TaskTag> {
        let mut inner = self.inner.write().await;

        if !inner.tasks.contains_key(&data.task_id) {
            return Err(StoreError::NotFound("Task does not exist".to_string()));
        }
        if !inner.tags.contains_key(&data.tag_id) {
            return Err(StoreError::NotFound("Tag does not exist".to_string()));
        }
        if inner
            .task_tags
            .values()
            .any(|tt| tt.task_id == data.task_id && tt.tag_id == data.tag_id)
        {
            return Err(StoreError::Conflict(
                "Tag already assigned to this task".to_string(),
            ));
        }

        let task_tag = TaskTag {
            id: Uuid::new_v4(),
            task_id: data.task_id,
            tag_id: data.tag_id,
            created_at: Utc::now(),
        };
        inner.stamp(task_tag.id);
        inner.task_tags.insert(task_tag.id, task_tag.clone());
        Ok(task_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::board_member::BoardRole;

    async fn seed_user(store: &MemStore, email: &str) -> User {
        store
            .create_user(CreateUser {
                email: email.to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
    }

    async fn seed_board(store: &MemStore, owner_id: Uuid, title: &str) -> Board {
        store
            .create_board(CreateBoard {
                title: title.to_string(),
                owner_id,
            })
            .await
            .unwrap()
    }

    async fn seed_column(store: &MemStore, board_id: Uuid, title: &str, position: i32) -> BoardColumn {
        store
            .create_column(CreateColumn {
                title: title.to_string(),
                position,
                board_id,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemStore::new();
        seed_user(&store, "a@x.com").await;

        let err = store
            .create_user(CreateUser {
                email: "a@x.com".to_string(),
                password_hash: "other".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_board_delete_cascades_columns_and_tasks() {
        let store = MemStore::new();
        let user = seed_user(&store, "a@x.com").await;
        let board = seed_board(&store, user.id, "Board").await;
        let column = seed_column(&store, board.id, "To Do", 0).await;
        store
            .create_task(CreateTask {
                title: "Task".to_string(),
                description: None,
                completed: false,
                position: 0,
                column_id: column.id,
            })
            .await
            .unwrap();

        assert!(store.delete_board(board.id, user.id).await.unwrap());

        assert!(store.list_columns_for_user(user.id).await.unwrap().is_empty());
        assert!(store.list_tasks_for_user(user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_board_delete_requires_ownership() {
        let store = MemStore::new();
        let owner = seed_user(&store, "owner@x.com").await;
        let stranger = seed_user(&store, "stranger@x.com").await;
        let board = seed_board(&store, owner.id, "Board").await;

        assert!(!store.delete_board(board.id, stranger.id).await.unwrap());
        assert!(store.find_board(board.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_column_delete_cascades_tasks() {
        let store = MemStore::new();
        let user = seed_user(&store, "a@x.com").await;
        let board = seed_board(&store, user.id, "Board").await;
        let column = seed_column(&store, board.id, "To Do", 0).await;
        store
            .create_task(CreateTask {
                title: "Task".to_string(),
                description: None,
                completed: false,
                position: 0,
                column_id: column.id,
            })
            .await
            .unwrap();

        assert!(store.delete_column(column.id, user.id).await.unwrap());
        assert!(store.list_tasks_for_user(user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_membership_pair_unique() {
        let store = MemStore::new();
        let owner = seed_user(&store, "owner@x.com").await;
        let member = seed_user(&store, "member@x.com").await;
        let board = seed_board(&store, owner.id, "Board").await;

        store
            .add_board_member(CreateBoardMember {
                user_id: member.id,
                board_id: board.id,
                role: BoardRole::Member,
            })
            .await
            .unwrap();

        let err = store
            .add_board_member(CreateBoardMember {
                user_id: member.id,
                board_id: board.id,
                role: BoardRole::Member,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_membership_grants_board_visibility() {
        let store = MemStore::new();
        let owner = seed_user(&store, "owner@x.com").await;
        let member = seed_user(&store, "member@x.com").await;
        let board = seed_board(&store, owner.id, "Shared").await;

        assert!(store.list_boards_for_user(member.id).await.unwrap().is_empty());

        store
            .add_board_member(CreateBoardMember {
                user_id: member.id,
                board_id: board.id,
                role: BoardRole::Member,
            })
            .await
            .unwrap();

        let visible = store.list_boards_for_user(member.id).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, board.id);
    }

    #[tokio::test]
    async fn test_task_tag_pair_unique_and_references_checked() {
        let store = MemStore::new();
        let user = seed_user(&store, "a@x.com").await;
        let board = seed_board(&store, user.id, "Board").await;
        let column = seed_column(&store, board.id, "To Do", 0).await;
        let task = store
            .create_task(CreateTask {
                title: "Task".to_string(),
                description: None,
                completed: false,
                position: 0,
                column_id: column.id,
            })
            .await
            .unwrap();
        let tag = store.create_tag("urgent").await.unwrap();

        store
            .add_task_tag(CreateTaskTag {
                task_id: task.id,
                tag_id: tag.id,
            })
            .await
            .unwrap();

        let dup = store
            .add_task_tag(CreateTaskTag {
                task_id: task.id,
                tag_id: tag.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(dup, StoreError::Conflict(_)));

        let missing = store
            .add_task_tag(CreateTaskTag {
                task_id: Uuid::new_v4(),
                tag_id: tag.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(missing, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_task_partial_fields() {
        let store = MemStore::new();
        let user = seed_user(&store, "a@x.com").await;
        let board = seed_board(&store, user.id, "Board").await;
        let column = seed_column(&store, board.id, "To Do", 0).await;
        let task = store
            .create_task(CreateTask {
                title: "Original".to_string(),
                description: Some("desc".to_string()),
                completed: false,
                position: 0,
                column_id: column.id,
            })
            .await
            .unwrap();

        let updated = store
            .update_task(
                task.id,
                user.id,
                UpdateTask {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert!(updated.completed);
        assert_eq!(updated.title, "Original");
        assert_eq!(updated.description.as_deref(), Some("desc"));
    }

    #[tokio::test]
    async fn test_ownership_scoping_hides_other_users_tasks() {
        let store = MemStore::new();
        let alice = seed_user(&store, "alice@x.com").await;
        let bob = seed_user(&store, "bob@x.com").await;
        let board = seed_board(&store, alice.id, "Board").await;
        let column = seed_column(&store, board.id, "To Do", 0).await;
        let task = store
            .create_task(CreateTask {
                title: "Private".to_string(),
                description: None,
                completed: false,
                position: 0,
                column_id: column.id,
            })
            .await
            .unwrap();

        assert!(store.find_task_for_user(task.id, bob.id).await.unwrap().is_none());
        assert!(store
            .update_task(task.id, bob.id, UpdateTask::default())
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete_task(task.id, bob.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_latest_board_for_owner() {
        let store = MemStore::new();
        let user = seed_user(&store, "a@x.com").await;
        seed_board(&store, user.id, "First").await;
        let second = seed_board(&store, user.id, "Second").await;

        let latest = store.latest_board_for_owner(user.id).await.unwrap().unwrap();
        assert_eq!(latest.id, second.id);
    }

    #[tokio::test]
    async fn test_columns_ordered_by_position() {
        let store = MemStore::new();
        let user = seed_user(&store, "a@x.com").await;
        let board = seed_board(&store, user.id, "Board").await;
        seed_column(&store, board.id, "Done", 2).await;
        seed_column(&store, board.id, "To Do", 0).await;
        seed_column(&store, board.id, "In Progress", 1).await;

        let columns = store.list_columns_for_board(board.id).await.unwrap();
        let titles: Vec<&str> = columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
    }
}
