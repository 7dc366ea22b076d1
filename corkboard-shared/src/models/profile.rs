/// User profile model (gamification state)
///
/// Exactly one profile exists per user, created at registration with
/// xp=0 and level=1, and cascade-deleted with its owner.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Per-user gamification profile
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    /// Unique profile ID
    pub id: Uuid,

    /// Experience points (never negative)
    pub xp: i32,

    /// Level (starts at 1)
    pub level: i32,

    /// Owning user
    pub user_id: Uuid,

    /// When the profile was created
    pub created_at: DateTime<Utc>,

    /// When the profile was last updated
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Creates the profile for a freshly registered user
    ///
    /// The database defaults supply xp=0 and level=1.
    pub async fn create(pool: &PgPool, user_id: Uuid) -> Result<Self, sqlx::Error> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (user_id)
            VALUES ($1)
            RETURNING id, xp, level, user_id, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(profile)
    }

    /// Finds the profile belonging to a user
    pub async fn find_by_user(pool: &PgPool, user_id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, xp, level, user_id, created_at, updated_at
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }
}
