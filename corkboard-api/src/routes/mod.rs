/// API route handlers
///
/// Organized by resource:
///
/// - `health`: liveness endpoint
/// - `auth`: registration, login, token refresh, password reset, me
/// - `boards`: board CRUD and membership grants
/// - `columns`: column CRUD
/// - `tasks`: task CRUD and tag assignment
/// - `tags`: tag catalog
/// - `sync`: offline-client sync acknowledgement
pub mod auth;
pub mod boards;
pub mod columns;
pub mod health;
pub mod sync;
pub mod tags;
pub mod tasks;
