/// Backend contract
///
/// The abstract operation set shared by the local embedded store and the
/// remote REST API: {list, create, update, delete} for tasks and
/// columns. The facade routes every call to whichever implementation the
/// current mode selects; callers never see which one answered.
///
/// # Example
///
/// ```no_run
/// use corkboard_client::backend::{Backend, TaskDraft};
/// use corkboard_client::local::LocalStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = LocalStore::open("/tmp/corkboard.json".into())?;
///
/// let task = store
///     .create_task(TaskDraft {
///         title: "Write docs".to_string(),
///         description: None,
///         column_id: None,
///         completed: false,
///     })
///     .await?;
/// assert!(!task.id.is_empty());
/// # Ok(())
/// # }
/// ```
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Backend error types
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Record does not exist on this backend
    #[error("Record not found: {0}")]
    NotFound(String),

    /// No usable credentials for the remote backend
    #[error("Not authenticated")]
    Unauthenticated,

    /// HTTP transport or server failure
    #[error("Request failed: {0}")]
    Http(String),

    /// Local persistence failure
    #[error("Storage failed: {0}")]
    Storage(String),
}

/// Backend result type alias
pub type BackendResult<T> = Result<T, BackendError>;

/// Task record as the client sees it
///
/// Unknown server fields (timestamps etc.) are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Record ID (backend-assigned)
    pub id: String,

    /// Task title
    pub title: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Completion flag
    #[serde(default)]
    pub completed: bool,

    /// Display order within the column
    #[serde(default)]
    pub position: i32,

    /// Owning column
    pub column_id: String,
}

/// Column record as the client sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRecord {
    /// Record ID (backend-assigned)
    pub id: String,

    /// Column title
    pub title: String,

    /// Display order
    #[serde(default)]
    pub position: i32,
}

/// Input for creating a task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Target column; None lets the backend pick its default
    pub column_id: Option<String>,

    /// Completion flag
    #[serde(default)]
    pub completed: bool,
}

/// Partial task update; absent fields stay unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New completion flag
    pub completed: Option<bool>,

    /// New display order
    pub position: Option<i32>,

    /// Move to another column
    pub column_id: Option<String>,
}

/// Input for creating a column
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnDraft {
    /// Column title
    pub title: String,

    /// Display order; None appends after existing columns
    pub position: Option<i32>,
}

/// Partial column update; absent fields stay unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnPatch {
    /// New title
    pub title: Option<String>,

    /// New display order
    pub position: Option<i32>,
}

/// The dual-mode operation set
///
/// Implementations must be safe to share across tasks; the facade holds
/// them behind `Arc`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Human-readable backend name for logs
    fn name(&self) -> &str;

    /// Lists all tasks
    async fn list_tasks(&self) -> BackendResult<Vec<TaskRecord>>;

    /// Creates a task
    async fn create_task(&self, draft: TaskDraft) -> BackendResult<TaskRecord>;

    /// Partially updates a task
    async fn update_task(&self, id: &str, patch: TaskPatch) -> BackendResult<TaskRecord>;

    /// Deletes a task
    async fn delete_task(&self, id: &str) -> BackendResult<()>;

    /// Lists all columns
    async fn list_columns(&self) -> BackendResult<Vec<ColumnRecord>>;

    /// Creates a column
    async fn create_column(&self, draft: ColumnDraft) -> BackendResult<ColumnRecord>;

    /// Partially updates a column
    async fn update_column(&self, id: &str, patch: ColumnPatch) -> BackendResult<ColumnRecord>;

    /// Deletes a column
    async fn delete_column(&self, id: &str) -> BackendResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_record_ignores_unknown_fields() {
        let json = r#"{
            "id": "abc",
            "title": "Task",
            "description": null,
            "completed": false,
            "position": 0,
            "column_id": "col-1",
            "created_at": "2026-01-21T08:00:00Z",
            "updated_at": "2026-01-21T08:00:00Z"
        }"#;

        let record: TaskRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "abc");
        assert_eq!(record.column_id, "col-1");
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch: TaskPatch = serde_json::from_str(r#"{"completed": true}"#).unwrap();
        assert_eq!(patch.completed, Some(true));
        assert!(patch.title.is_none());
        assert!(patch.column_id.is_none());
    }
}
