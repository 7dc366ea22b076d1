/// Session-state manager
///
/// Owns the access/refresh token pair with an explicit load/store
/// lifecycle tied to a session file: loaded once at client start,
/// rewritten on every change, cleared on logout. HTTP calls read the
/// token through the manager; there is no module-level token state
/// anywhere in the client.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Error type for session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Session file could not be read or written
    #[error("Session storage failed: {0}")]
    Storage(String),

    /// Credential exchange with the server failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Transport failure
    #[error("Request failed: {0}")]
    Http(String),

    /// No refresh token to rotate
    #[error("Not authenticated")]
    Unauthenticated,
}

/// Persisted session contents
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionState {
    #[serde(default)]
    token: Option<String>,

    #[serde(default)]
    refresh_token: Option<String>,
}

/// Token pair as the auth endpoints return it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenPair {
    token: String,
    refresh_token: String,
}

/// Session manager with file-backed token state
pub struct Session {
    path: PathBuf,
    state: RwLock<SessionState>,
}

impl Session {
    /// Loads the session from `path`; a missing file means logged out
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` when the file exists but cannot
    /// be read or parsed
    pub fn load(path: PathBuf) -> Result<Self, SessionError> {
        let state = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| SessionError::Storage(format!("read {}: {}", path.display(), e)))?;
            serde_json::from_str(&raw)
                .map_err(|e| SessionError::Storage(format!("parse {}: {}", path.display(), e)))?
        } else {
            SessionState::default()
        };

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// Current access token, if logged in
    pub async fn access_token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    /// Whether a token pair is present
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.token.is_some()
    }

    /// Stores a fresh token pair and persists it
    pub async fn store_tokens(
        &self,
        token: String,
        refresh_token: String,
    ) -> Result<(), SessionError> {
        let mut state = self.state.write().await;
        state.token = Some(token);
        state.refresh_token = Some(refresh_token);
        self.persist(&state)
    }

    /// Drops the token pair (logout) and persists the empty state
    pub async fn clear(&self) -> Result<(), SessionError> {
        let mut state = self.state.write().await;
        state.token = None;
        state.refresh_token = None;
        self.persist(&state)
    }

    /// Exchanges credentials for a token pair
    ///
    /// # Errors
    ///
    /// `SessionError::Auth` on a rejected login, `SessionError::Http` on
    /// transport failure
    pub async fn login(
        &self,
        http: &reqwest::Client,
        base_url: &str,
        email: &str,
        password: &str,
    ) -> Result<(), SessionError> {
        let response = http
            .post(format!("{}/api/auth/login", base_url))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| SessionError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SessionError::Auth(format!(
                "login rejected ({})",
                response.status()
            )));
        }

        let pair: TokenPair = response
            .json()
            .await
            .map_err(|e| SessionError::Http(e.to_string()))?;

        self.store_tokens(pair.token, pair.refresh_token).await
    }

    /// Rotates the token pair using the stored refresh token
    ///
    /// # Errors
    ///
    /// `SessionError::Unauthenticated` without a refresh token;
    /// `SessionError::Auth` when the server rejects it (stale token)
    pub async fn refresh(
        &self,
        http: &reqwest::Client,
        base_url: &str,
    ) -> Result<(), SessionError> {
        let refresh_token = self
            .state
            .read()
            .await
            .refresh_token
            .clone()
            .ok_or(SessionError::Unauthenticated)?;

        let response = http
            .post(format!("{}/api/auth/refresh", base_url))
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await
            .map_err(|e| SessionError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SessionError::Auth(format!(
                "refresh rejected ({})",
                response.status()
            )));
        }

        let pair: TokenPair = response
            .json()
            .await
            .map_err(|e| SessionError::Http(e.to_string()))?;

        self.store_tokens(pair.token, pair.refresh_token).await
    }

    fn persist(&self, state: &SessionState) -> Result<(), SessionError> {
        let raw = serde_json::to_string_pretty(state)
            .map_err(|e| SessionError::Storage(format!("serialize: {}", e)))?;
        std::fs::write(&self.path, raw)
            .map_err(|e| SessionError::Storage(format!("write {}: {}", self.path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_means_logged_out() {
        let dir = tempdir().unwrap();
        let session = Session::load(dir.path().join("session.json")).unwrap();

        assert!(!session.is_authenticated().await);
        assert!(session.access_token().await.is_none());
    }

    #[tokio::test]
    async fn test_tokens_survive_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        {
            let session = Session::load(path.clone()).unwrap();
            session
                .store_tokens("access-abc".to_string(), "refresh-def".to_string())
                .await
                .unwrap();
        }

        let reloaded = Session::load(path).unwrap();
        assert_eq!(reloaded.access_token().await.as_deref(), Some("access-abc"));
        assert!(reloaded.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_clear_removes_tokens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = Session::load(path.clone()).unwrap();
        session
            .store_tokens("a".to_string(), "b".to_string())
            .await
            .unwrap();
        session.clear().await.unwrap();

        assert!(!session.is_authenticated().await);
        let reloaded = Session::load(path).unwrap();
        assert!(!reloaded.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_refresh_without_token_fails() {
        let dir = tempdir().unwrap();
        let session = Session::load(dir.path().join("session.json")).unwrap();

        let err = session
            .refresh(&reqwest::Client::new(), "http://localhost:0")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Unauthenticated));
    }
}
