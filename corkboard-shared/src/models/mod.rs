/// Database models for Corkboard
///
/// This module contains all entity models and their relational CRUD
/// operations. Handlers never call these directly; they go through the
/// `store` abstraction, whose Postgres implementation delegates here.
///
/// # Models
///
/// - `user`: User accounts and credential state
/// - `profile`: Per-user gamification profile (xp, level), 1:1 with user
/// - `board`: Boards owned by a user
/// - `column`: Ordered columns within a board
/// - `task`: Tasks within a column
/// - `tag`: Globally unique tags
/// - `board_member`: User↔board membership join records
/// - `task_tag`: Task↔tag join records
pub mod board;
pub mod board_member;
pub mod column;
pub mod profile;
pub mod tag;
pub mod task;
pub mod task_tag;
pub mod user;
