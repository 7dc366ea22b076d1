/// Dual-mode client facade
///
/// [`BoardClient`] owns both backends, the session manager, and the
/// persisted mode flag, and routes every board operation to whichever
/// backend the current mode selects. Switching modes never moves data by
/// itself; migration is an explicit one-shot call.
///
/// # Example
///
/// ```no_run
/// use corkboard_client::facade::{BoardClient, ClientConfig};
/// use corkboard_client::mode::Mode;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut client = BoardClient::open(ClientConfig {
///     base_url: "http://localhost:3000".to_string(),
///     data_dir: "/home/me/.corkboard".into(),
/// })?;
///
/// // Work offline
/// let tasks = client.backend().list_tasks().await?;
/// println!("{} tasks", tasks.len());
///
/// // Go online and copy everything up
/// client.session().login(client.http(), client.base_url(), "a@x.com", "password123").await?;
/// let report = client.migrate_to_remote().await?;
/// println!("copied {} tasks", report.tasks_copied);
/// client.set_mode(Mode::Remote)?;
/// # Ok(())
/// # }
/// ```
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::backend::{Backend, BackendError};
use crate::local::LocalStore;
use crate::migrate::{migrate, MigrationReport};
use crate::mode::{load_mode, store_mode, Mode, SettingsError};
use crate::remote::RemoteBackend;
use crate::session::{Session, SessionError};

/// Error type for facade operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Backend operation failed
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Session persistence or credential exchange failed
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Settings persistence failed
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Facade configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Remote API base URL, no trailing slash
    pub base_url: String,

    /// Directory for the local store, session, and settings files
    pub data_dir: PathBuf,
}

/// The dual-mode client
pub struct BoardClient {
    mode: Mode,
    settings_path: PathBuf,
    base_url: String,
    http: reqwest::Client,
    session: Arc<Session>,
    local: LocalStore,
    remote: RemoteBackend,
}

impl BoardClient {
    /// Opens the client, loading local store, session, and mode from the
    /// data directory (created on first use)
    ///
    /// # Errors
    ///
    /// Returns an error when the data directory cannot be created or an
    /// existing state file is unreadable
    pub fn open(config: ClientConfig) -> Result<Self, ClientError> {
        std::fs::create_dir_all(&config.data_dir).map_err(|e| {
            BackendError::Storage(format!("create {}: {}", config.data_dir.display(), e))
        })?;

        let settings_path = config.data_dir.join("settings.json");
        let mode = load_mode(&settings_path);

        let http = reqwest::Client::new();
        let session = Arc::new(Session::load(config.data_dir.join("session.json"))?);
        let local = LocalStore::open(config.data_dir.join("board.json"))?;
        let remote = RemoteBackend::new(http.clone(), config.base_url.clone(), session.clone());

        info!(mode = mode.as_str(), "Board client opened");

        Ok(Self {
            mode,
            settings_path,
            base_url: config.base_url,
            http,
            session,
            local,
            remote,
        })
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches mode and persists the choice for the next session
    ///
    /// Data does not move; call [`Self::migrate_to_remote`] or
    /// [`Self::migrate_to_local`] explicitly first when that is wanted.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), ClientError> {
        store_mode(&self.settings_path, mode)?;
        self.mode = mode;
        info!(mode = mode.as_str(), "Mode switched");
        Ok(())
    }

    /// The backend serving the current mode
    pub fn backend(&self) -> &dyn Backend {
        match self.mode {
            Mode::Local => &self.local,
            Mode::Remote => &self.remote,
        }
    }

    /// Session manager (login, refresh, logout)
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Shared HTTP client for session calls
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Remote API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Copies the local store's columns and tasks to the remote API,
    /// best effort (failures logged and skipped, no rollback)
    pub async fn migrate_to_remote(&self) -> Result<MigrationReport, ClientError> {
        Ok(migrate(&self.local, &self.remote).await?)
    }

    /// Copies the remote data into the local store, best effort
    pub async fn migrate_to_local(&self) -> Result<MigrationReport, ClientError> {
        Ok(migrate(&self.remote, &self.local).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_client(dir: &tempfile::TempDir) -> BoardClient {
        BoardClient::open(ClientConfig {
            base_url: "http://localhost:0".to_string(),
            data_dir: dir.path().to_path_buf(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_defaults_to_local_mode() {
        let dir = tempdir().unwrap();
        let client = open_client(&dir);

        assert_eq!(client.mode(), Mode::Local);
        assert_eq!(client.backend().name(), "local");
        // Local backend answers without any network
        assert_eq!(client.backend().list_columns().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_mode_switch_persists_across_open() {
        let dir = tempdir().unwrap();

        {
            let mut client = open_client(&dir);
            client.set_mode(Mode::Remote).unwrap();
            assert_eq!(client.backend().name(), "remote");
        }

        let reopened = open_client(&dir);
        assert_eq!(reopened.mode(), Mode::Remote);
    }

    #[tokio::test]
    async fn test_local_data_survives_reopen() {
        let dir = tempdir().unwrap();

        {
            let client = open_client(&dir);
            client
                .backend()
                .create_task(crate::backend::TaskDraft {
                    title: "Offline task".to_string(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let reopened = open_client(&dir);
        let tasks = reopened.backend().list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Offline task");
    }
}
