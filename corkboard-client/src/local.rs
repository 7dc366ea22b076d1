/// Embedded local store
///
/// A JSON-file-backed implementation of the [`Backend`] contract for
/// fully offline use. The whole store loads at open and the file is
/// rewritten after every mutation; board-scale data stays far below the
/// point where that matters.
///
/// A fresh store starts with the standard three columns ("To Do",
/// "In Progress", "Done"), mirroring what the server seeds at
/// registration.
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::{
    Backend, BackendError, BackendResult, ColumnDraft, ColumnPatch, ColumnRecord, TaskDraft,
    TaskPatch, TaskRecord,
};

/// Seed columns for a fresh store, in position order
const SEED_COLUMNS: [&str; 3] = ["To Do", "In Progress", "Done"];

/// Serialized store contents
#[derive(Debug, Default, Serialize, Deserialize)]
struct LocalData {
    tasks: Vec<TaskRecord>,
    columns: Vec<ColumnRecord>,
}

/// JSON-file-backed backend
pub struct LocalStore {
    path: PathBuf,
    data: Mutex<LocalData>,
}

impl LocalStore {
    /// Opens the store at `path`, creating a seeded one when the file
    /// does not exist yet
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Storage` when the file exists but cannot
    /// be read or parsed
    pub fn open(path: PathBuf) -> BackendResult<Self> {
        let data = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| BackendError::Storage(format!("read {}: {}", path.display(), e)))?;
            serde_json::from_str(&raw)
                .map_err(|e| BackendError::Storage(format!("parse {}: {}", path.display(), e)))?
        } else {
            LocalData {
                tasks: Vec::new(),
                columns: SEED_COLUMNS
                    .iter()
                    .enumerate()
                    .map(|(position, title)| ColumnRecord {
                        id: Uuid::new_v4().to_string(),
                        title: title.to_string(),
                        position: position as i32,
                    })
                    .collect(),
            }
        };

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    /// Rewrites the backing file from the given state
    fn persist(&self, data: &LocalData) -> BackendResult<()> {
        let raw = serde_json::to_string_pretty(data)
            .map_err(|e| BackendError::Storage(format!("serialize: {}", e)))?;
        std::fs::write(&self.path, raw)
            .map_err(|e| BackendError::Storage(format!("write {}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl Backend for LocalStore {
    fn name(&self) -> &str {
        "local"
    }

    async fn list_tasks(&self) -> BackendResult<Vec<TaskRecord>> {
        let data = self.data.lock().await;
        let mut tasks = data.tasks.clone();
        tasks.sort_by_key(|t| t.position);
        Ok(tasks)
    }

    async fn create_task(&self, draft: TaskDraft) -> BackendResult<TaskRecord> {
        let mut data = self.data.lock().await;

        let column_id = match draft.column_id {
            Some(column_id) => {
                if !data.columns.iter().any(|c| c.id == column_id) {
                    return Err(BackendError::NotFound(format!("column {}", column_id)));
                }
                column_id
            }
            None => data
                .columns
                .iter()
                .min_by_key(|c| c.position)
                .map(|c| c.id.clone())
                .ok_or_else(|| BackendError::NotFound("no columns in store".to_string()))?,
        };

        let position = data.tasks.iter().filter(|t| t.column_id == column_id).count() as i32;
        let task = TaskRecord {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            completed: draft.completed,
            position,
            column_id,
        };

        data.tasks.push(task.clone());
        self.persist(&data)?;
        Ok(task)
    }

    async fn update_task(&self, id: &str, patch: TaskPatch) -> BackendResult<TaskRecord> {
        let mut data = self.data.lock().await;

        if let Some(column_id) = &patch.column_id {
            if !data.columns.iter().any(|c| &c.id == column_id) {
                return Err(BackendError::NotFound(format!("column {}", column_id)));
            }
        }

        let task = data
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| BackendError::NotFound(format!("task {}", id)))?;

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        if let Some(position) = patch.position {
            task.position = position;
        }
        if let Some(column_id) = patch.column_id {
            task.column_id = column_id;
        }

        let updated = task.clone();
        self.persist(&data)?;
        Ok(updated)
    }

    async fn delete_task(&self, id: &str) -> BackendResult<()> {
        let mut data = self.data.lock().await;

        let before = data.tasks.len();
        data.tasks.retain(|t| t.id != id);
        if data.tasks.len() == before {
            return Err(BackendError::NotFound(format!("task {}", id)));
        }

        self.persist(&data)
    }

    async fn list_columns(&self) -> BackendResult<Vec<ColumnRecord>> {
        let data = self.data.lock().await;
        let mut columns = data.columns.clone();
        columns.sort_by_key(|c| c.position);
        Ok(columns)
    }

    async fn create_column(&self, draft: ColumnDraft) -> BackendResult<ColumnRecord> {
        let mut data = self.data.lock().await;

        let column = ColumnRecord {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            position: draft.position.unwrap_or(data.columns.len() as i32),
        };

        data.columns.push(column.clone());
        self.persist(&data)?;
        Ok(column)
    }

    async fn update_column(&self, id: &str, patch: ColumnPatch) -> BackendResult<ColumnRecord> {
        let mut data = self.data.lock().await;

        let column = data
            .columns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| BackendError::NotFound(format!("column {}", id)))?;

        if let Some(title) = patch.title {
            column.title = title;
        }
        if let Some(position) = patch.position {
            column.position = position;
        }

        let updated = column.clone();
        self.persist(&data)?;
        Ok(updated)
    }

    async fn delete_column(&self, id: &str) -> BackendResult<()> {
        let mut data = self.data.lock().await;

        let before = data.columns.len();
        data.columns.retain(|c| c.id != id);
        if data.columns.len() == before {
            return Err(BackendError::NotFound(format!("column {}", id)));
        }

        // Tasks go with their column
        data.tasks.retain(|t| t.column_id != id);
        self.persist(&data)
    }
}
