/// Board membership model
///
/// Join records linking users to boards with a role. The
/// (user_id, board_id) pair is unique: adding the same user to the same
/// board twice is a conflict, not an upsert.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE board_role AS ENUM ('owner', 'member');
///
/// CREATE TABLE board_members (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
///     role board_role NOT NULL DEFAULT 'member',
///     joined_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (user_id, board_id)
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Membership roles on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "board_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BoardRole {
    /// Full control over the board
    Owner,

    /// Shared access
    Member,
}

impl BoardRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardRole::Owner => "owner",
            BoardRole::Member => "member",
        }
    }
}

/// Board membership join record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BoardMember {
    /// Unique membership ID
    pub id: Uuid,

    /// Member user
    pub user_id: Uuid,

    /// Target board
    pub board_id: Uuid,

    /// Role within the board
    pub role: BoardRole,

    /// When the membership was created
    pub joined_at: DateTime<Utc>,
}

/// Input for creating a membership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoardMember {
    /// Member user
    pub user_id: Uuid,

    /// Target board
    pub board_id: Uuid,

    /// Role to assign (defaults to Member)
    #[serde(default = "default_role")]
    pub role: BoardRole,
}

fn default_role() -> BoardRole {
    BoardRole::Member
}

impl BoardMember {
    /// Creates a membership (adds a user to a board)
    ///
    /// # Errors
    ///
    /// Returns an error if the pair already exists (unique constraint) or
    /// the referenced user/board is missing (FK violation)
    pub async fn create(pool: &PgPool, data: CreateBoardMember) -> Result<Self, sqlx::Error> {
        let member = sqlx::query_as::<_, BoardMember>(
            r#"
            INSERT INTO board_members (user_id, board_id, role)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, board_id, role, joined_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.board_id)
        .bind(data.role)
        .fetch_one(pool)
        .await?;

        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_role_as_str() {
        assert_eq!(BoardRole::Owner.as_str(), "owner");
        assert_eq!(BoardRole::Member.as_str(), "member");
    }

    #[test]
    fn test_create_board_member_default_role() {
        assert_eq!(default_role(), BoardRole::Member);

        let parsed: CreateBoardMember = serde_json::from_str(
            r#"{"user_id":"6f2b0b0a-3e0e-4d8f-9e7a-111111111111",
                "board_id":"6f2b0b0a-3e0e-4d8f-9e7a-222222222222"}"#,
        )
        .unwrap();
        assert_eq!(parsed.role, BoardRole::Member);
    }
}
