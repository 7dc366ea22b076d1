/// Task-tag assignment model
///
/// Join records linking tasks to tags. The (task_id, tag_id) pair is
/// unique: assigning the same tag twice is a conflict.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task-tag join record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskTag {
    /// Unique assignment ID
    pub id: Uuid,

    /// Tagged task
    pub task_id: Uuid,

    /// Assigned tag
    pub tag_id: Uuid,

    /// When the assignment was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a task-tag assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskTag {
    /// Tagged task
    pub task_id: Uuid,

    /// Assigned tag
    pub tag_id: Uuid,
}

impl TaskTag {
    /// Assigns a tag to a task
    ///
    /// # Errors
    ///
    /// Returns an error if the pair already exists (unique constraint) or
    /// the referenced task/tag is missing (FK violation)
    pub async fn create(pool: &PgPool, data: CreateTaskTag) -> Result<Self, sqlx::Error> {
        let task_tag = sqlx::query_as::<_, TaskTag>(
            r#"
            INSERT INTO task_tags (task_id, tag_id)
            VALUES ($1, $2)
            RETURNING id, task_id, tag_id, created_at
            "#,
        )
        .bind(data.task_id)
        .bind(data.tag_id)
        .fetch_one(pool)
        .await?;

        Ok(task_tag)
    }
}
