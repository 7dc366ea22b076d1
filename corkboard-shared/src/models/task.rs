/// Task model and database operations
///
/// A task is a unit of work with a completion flag, belonging to exactly
/// one column. `position` orders tasks within their column and is
/// advisory, like column positions.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     position INTEGER NOT NULL DEFAULT 0,
///     column_id UUID NOT NULL REFERENCES board_columns(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Completion flag
    pub completed: bool,

    /// Display order within the column (advisory)
    pub position: i32,

    /// Owning column
    pub column_id: Uuid,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Completion flag (defaults to false)
    pub completed: bool,

    /// Display order within the column
    pub position: i32,

    /// Owning column
    pub column_id: Uuid,
}

/// Input for updating an existing task
///
/// All fields are optional; only present fields are changed. Absent
/// fields keep their stored value (a description cannot be cleared
/// through this path, matching partial-update semantics).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
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

const TASK_COLUMNS: &str =
    "id, title, description, completed, position, column_id, created_at, updated_at";

impl Task {
    /// Creates a new task
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (title, description, completed, position, column_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(data.title)
        .bind(data.description)
        .bind(data.completed)
        .bind(data.position)
        .bind(data.column_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists every task in boards owned by a user, position order
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.title, t.description, t.completed, t.position, t.column_id,
                   t.created_at, t.updated_at
            FROM tasks t
            JOIN board_columns c ON c.id = t.column_id
            JOIN boards b ON b.id = c.board_id
            WHERE b.owner_id = $1
            ORDER BY t.position ASC, t.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Finds a task by ID, scoped to the board owner
    pub async fn find_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.title, t.description, t.completed, t.position, t.column_id,
                   t.created_at, t.updated_at
            FROM tasks t
            JOIN board_columns c ON c.id = t.column_id
            JOIN boards b ON b.id = c.board_id
            WHERE t.id = $1 AND b.owner_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Partially updates a task, scoped to the board owner
    ///
    /// # Returns
    ///
    /// The updated task, or None when no owned task matched
    pub async fn update_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks t
            SET title = COALESCE($3, t.title),
                description = COALESCE($4, t.description),
                completed = COALESCE($5, t.completed),
                position = COALESCE($6, t.position),
                column_id = COALESCE($7, t.column_id),
                updated_at = NOW()
            FROM board_columns c
            JOIN boards b ON b.id = c.board_id
            WHERE t.id = $1 AND c.id = t.column_id AND b.owner_id = $2
            RETURNING t.id, t.title, t.description, t.completed, t.position, t.column_id,
                      t.created_at, t.updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.completed)
        .bind(data.position)
        .bind(data.column_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task, scoped to the board owner
    pub async fn delete_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks t
            USING board_columns c, boards b
            WHERE t.id = $1 AND c.id = t.column_id AND b.id = c.board_id AND b.owner_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts tasks in a column (supplies the default position for a
    /// newly appended task)
    pub async fn count_for_column(pool: &PgPool, column_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE column_id = $1")
            .bind(column_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
