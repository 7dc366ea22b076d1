//! # Corkboard Client
//!
//! The dual-mode client facade: the same logical board operations
//! served either by a local embedded store or by the remote REST API,
//! selected by a persisted mode flag.
//!
//! ## Module Organization
//!
//! - `backend`: the abstract operation set ({list, create, update,
//!   delete} for tasks and columns) every backend implements
//! - `local`: embedded JSON-file store
//! - `remote`: REST implementation over reqwest
//! - `session`: explicit session-state manager for auth tokens
//! - `mode`: the persisted local/remote selector
//! - `migrate`: one-shot best-effort bulk copy between backends
//! - `facade`: [`facade::BoardClient`], tying the pieces together
//!
//! There is no synchronization protocol between the two backends: no
//! conflict resolution, no partial-failure retry, no transactional
//! boundary. Migration copies records one by one and skips failures.

pub mod backend;
pub mod facade;
pub mod local;
pub mod migrate;
pub mod mode;
pub mod remote;
pub mod session;

/// Current version of the Corkboard client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
