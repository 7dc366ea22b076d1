/// Tag model
///
/// Tags are independent entities with globally unique names, attached to
/// tasks through the `task_tags` join table.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Tag model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    /// Unique tag ID
    pub id: Uuid,

    /// Unique tag name (e.g. "bug", "urgent", "backend")
    pub name: String,

    /// When the tag was created
    pub created_at: DateTime<Utc>,

    /// When the tag was last updated
    pub updated_at: DateTime<Utc>,
}

impl Tag {
    /// Creates a new tag
    ///
    /// # Errors
    ///
    /// Returns an error if the name already exists (unique constraint)
    pub async fn create(pool: &PgPool, name: &str) -> Result<Self, sqlx::Error> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .fetch_one(pool)
        .await?;

        Ok(tag)
    }

    /// Finds a tag by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let tag = sqlx::query_as::<_, Tag>(
            "SELECT id, name, created_at, updated_at FROM tags WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(tag)
    }

    /// Lists all tags, name order
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT id, name, created_at, updated_at FROM tags ORDER BY name ASC",
        )
        .fetch_all(pool)
        .await?;

        Ok(tags)
    }
}
