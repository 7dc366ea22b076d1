/// Column model and database operations
///
/// A column is an ordered bucket of tasks within a board. The `position`
/// field is an advisory display order: gaps and duplicates are tolerated,
/// nothing renumbers on deletion.
///
/// The table is named `board_columns` because `columns` collides with the
/// information-schema vocabulary; the Rust type is `BoardColumn` for the
/// same reason.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Column model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BoardColumn {
    /// Unique column ID
    pub id: Uuid,

    /// Column title
    pub title: String,

    /// Display order within the board (advisory, not unique)
    pub position: i32,

    /// Owning board
    pub board_id: Uuid,

    /// When the column was created
    pub created_at: DateTime<Utc>,

    /// When the column was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateColumn {
    /// Column title
    pub title: String,

    /// Display order
    pub position: i32,

    /// Owning board
    pub board_id: Uuid,
}

/// Input for updating an existing column
///
/// All fields are optional; only present fields are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateColumn {
    /// New title
    pub title: Option<String>,

    /// New display order
    pub position: Option<i32>,
}

impl BoardColumn {
    /// Creates a new column
    pub async fn create(pool: &PgPool, data: CreateColumn) -> Result<Self, sqlx::Error> {
        let column = sqlx::query_as::<_, BoardColumn>(
            r#"
            INSERT INTO board_columns (title, position, board_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, position, board_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.position)
        .bind(data.board_id)
        .fetch_one(pool)
        .await?;

        Ok(column)
    }

    /// Lists a board's columns, position order
    pub async fn list_for_board(pool: &PgPool, board_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let columns = sqlx::query_as::<_, BoardColumn>(
            r#"
            SELECT id, title, position, board_id, created_at, updated_at
            FROM board_columns
            WHERE board_id = $1
            ORDER BY position ASC, created_at ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await?;

        Ok(columns)
    }

    /// Lists every column in boards owned by a user, position order
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let columns = sqlx::query_as::<_, BoardColumn>(
            r#"
            SELECT c.id, c.title, c.position, c.board_id, c.created_at, c.updated_at
            FROM board_columns c
            JOIN boards b ON b.id = c.board_id
            WHERE b.owner_id = $1
            ORDER BY c.position ASC, c.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(columns)
    }

    /// Finds a column by ID, scoped to the board owner
    pub async fn find_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let column = sqlx::query_as::<_, BoardColumn>(
            r#"
            SELECT c.id, c.title, c.position, c.board_id, c.created_at, c.updated_at
            FROM board_columns c
            JOIN boards b ON b.id = c.board_id
            WHERE c.id = $1 AND b.owner_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(column)
    }

    /// Partially updates a column, scoped to the board owner
    ///
    /// # Returns
    ///
    /// The updated column, or None when no owned column matched
    pub async fn update_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        data: UpdateColumn,
    ) -> Result<Option<Self>, sqlx::Error> {
        let column = sqlx::query_as::<_, BoardColumn>(
            r#"
            UPDATE board_columns c
            SET title = COALESCE($3, c.title),
                position = COALESCE($4, c.position),
                updated_at = NOW()
            FROM boards b
            WHERE c.id = $1 AND b.id = c.board_id AND b.owner_id = $2
            RETURNING c.id, c.title, c.position, c.board_id, c.created_at, c.updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(data.title)
        .bind(data.position)
        .fetch_optional(pool)
        .await?;

        Ok(column)
    }

    /// Deletes a column, scoped to the board owner; its tasks cascade
    pub async fn delete_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM board_columns c
            USING boards b
            WHERE c.id = $1 AND b.id = c.board_id AND b.owner_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts columns in a board (supplies the default position for a
    /// newly appended column)
    pub async fn count_for_board(pool: &PgPool, board_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM board_columns WHERE board_id = $1")
                .bind(board_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}
