/// One-shot bulk migration between backends
///
/// Copies columns, then tasks, from a source backend to a destination
/// backend. Each record is migrated independently: a failure is logged
/// and skipped, never retried, and nothing already copied is rolled
/// back. The caller decides what to do with a partial result.
///
/// Destination backends assign fresh ids, so tasks are re-pointed at the
/// copied column that replaced their source column; tasks whose column
/// failed to copy fall back to the destination's default column.
use std::collections::HashMap;

use tracing::{info, warn};

use crate::backend::{Backend, ColumnDraft, TaskDraft};

/// Outcome of a bulk migration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Columns copied to the destination
    pub columns_copied: usize,

    /// Columns skipped after a failure
    pub columns_skipped: usize,

    /// Tasks copied to the destination
    pub tasks_copied: usize,

    /// Tasks skipped after a failure
    pub tasks_skipped: usize,
}

impl MigrationReport {
    /// Whether every record made it across
    pub fn is_complete(&self) -> bool {
        self.columns_skipped == 0 && self.tasks_skipped == 0
    }
}

/// Copies all columns and tasks from `source` to `dest`, best effort
///
/// # Errors
///
/// Only listing the source fails the whole migration; per-record copy
/// failures are logged, counted, and skipped.
pub async fn migrate(
    source: &dyn Backend,
    dest: &dyn Backend,
) -> Result<MigrationReport, crate::backend::BackendError> {
    let mut report = MigrationReport::default();

    // source column id -> destination column id
    let mut column_map: HashMap<String, String> = HashMap::new();

    let columns = source.list_columns().await?;
    for column in columns {
        match dest
            .create_column(ColumnDraft {
                title: column.title.clone(),
                position: Some(column.position),
            })
            .await
        {
            Ok(copied) => {
                column_map.insert(column.id, copied.id);
                report.columns_copied += 1;
            }
            Err(e) => {
                warn!(column = %column.title, error = %e, "Skipping column");
                report.columns_skipped += 1;
            }
        }
    }

    let tasks = source.list_tasks().await?;
    for task in tasks {
        let column_id = column_map.get(&task.column_id).cloned();
        match dest
            .create_task(TaskDraft {
                title: task.title.clone(),
                description: task.description.clone(),
                column_id,
                completed: task.completed,
            })
            .await
        {
            Ok(_) => report.tasks_copied += 1,
            Err(e) => {
                warn!(task = %task.title, error = %e, "Skipping task");
                report.tasks_skipped += 1;
            }
        }
    }

    info!(
        from = source.name(),
        to = dest.name(),
        columns_copied = report.columns_copied,
        columns_skipped = report.columns_skipped,
        tasks_copied = report.tasks_copied,
        tasks_skipped = report.tasks_skipped,
        "Migration finished"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendResult;
    use crate::local::LocalStore;
    use tempfile::tempdir;

    async fn seeded_source(dir: &tempfile::TempDir) -> LocalStore {
        let source = LocalStore::open(dir.path().join("source.json")).unwrap();
        let columns = source.list_columns().await.unwrap();

        source
            .create_task(TaskDraft {
                title: "Task one".to_string(),
                description: Some("first".to_string()),
                column_id: Some(columns[0].id.clone()),
                completed: false,
            })
            .await
            .unwrap();
        source
            .create_task(TaskDraft {
                title: "Task two".to_string(),
                description: None,
                column_id: Some(columns[2].id.clone()),
                completed: true,
            })
            .await
            .unwrap();

        source
    }

    #[tokio::test]
    async fn test_migrate_copies_columns_and_tasks() {
        let dir = tempdir().unwrap();
        let source = seeded_source(&dir).await;
        let dest = LocalStore::open(dir.path().join("dest.json")).unwrap();

        let report = migrate(&source, &dest).await.unwrap();

        assert_eq!(report.columns_copied, 3);
        assert_eq!(report.tasks_copied, 2);
        assert!(report.is_complete());

        let tasks = dest.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 2);
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert!(titles.contains(&"Task one"));
        assert!(titles.contains(&"Task two"));
    }

    #[tokio::test]
    async fn test_migrate_remaps_column_ids() {
        let dir = tempdir().unwrap();
        let source = seeded_source(&dir).await;
        let dest = LocalStore::open(dir.path().join("dest.json")).unwrap();

        migrate(&source, &dest).await.unwrap();

        // Every migrated task must point at a column that exists on the
        // destination, not at a stale source id
        let dest_columns: Vec<String> = dest
            .list_columns()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        for task in dest.list_tasks().await.unwrap() {
            assert!(dest_columns.contains(&task.column_id));
        }
    }

    /// Backend that refuses every write, for the skip path
    struct RejectingBackend;

    #[async_trait::async_trait]
    impl Backend for RejectingBackend {
        fn name(&self) -> &str {
            "rejecting"
        }

        async fn list_tasks(&self) -> BackendResult<Vec<crate::backend::TaskRecord>> {
            Ok(Vec::new())
        }

        async fn create_task(
            &self,
            _draft: TaskDraft,
        ) -> BackendResult<crate::backend::TaskRecord> {
            Err(crate::backend::BackendError::Http("rejected".to_string()))
        }

        async fn update_task(
            &self,
            _id: &str,
            _patch: crate::backend::TaskPatch,
        ) -> BackendResult<crate::backend::TaskRecord> {
            Err(crate::backend::BackendError::Http("rejected".to_string()))
        }

        async fn delete_task(&self, _id: &str) -> BackendResult<()> {
            Err(crate::backend::BackendError::Http("rejected".to_string()))
        }

        async fn list_columns(&self) -> BackendResult<Vec<crate::backend::ColumnRecord>> {
            Ok(Vec::new())
        }

        async fn create_column(
            &self,
            _draft: ColumnDraft,
        ) -> BackendResult<crate::backend::ColumnRecord> {
            Err(crate::backend::BackendError::Http("rejected".to_string()))
        }

        async fn update_column(
            &self,
            _id: &str,
            _patch: crate::backend::ColumnPatch,
        ) -> BackendResult<crate::backend::ColumnRecord> {
            Err(crate::backend::BackendError::Http("rejected".to_string()))
        }

        async fn delete_column(&self, _id: &str) -> BackendResult<()> {
            Err(crate::backend::BackendError::Http("rejected".to_string()))
        }
    }

    #[tokio::test]
    async fn test_migrate_skips_failures_without_aborting() {
        let dir = tempdir().unwrap();
        let source = seeded_source(&dir).await;

        let report = migrate(&source, &RejectingBackend).await.unwrap();

        assert_eq!(report.columns_copied, 0);
        assert_eq!(report.columns_skipped, 3);
        assert_eq!(report.tasks_copied, 0);
        assert_eq!(report.tasks_skipped, 2);
        assert!(!report.is_complete());
    }
}
