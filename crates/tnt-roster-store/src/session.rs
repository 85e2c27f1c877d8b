/*
[INPUT]:  Token and user held by the store
[OUTPUT]: JSON session file that survives restarts
[POS]:    Persistence layer - session storage
[UPDATE]: When more client state needs to outlive the process
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tnt_roster_adapter::User;
use tokio::fs;
use tracing::debug;

use crate::error::Result;

const APP_DIR: &str = "tnt-roster";
const SESSION_FILE: &str = "session.json";

/// What gets remembered between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
    pub saved_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(token: impl Into<String>, user: Option<User>) -> Self {
        Self {
            token: token.into(),
            user,
            saved_at: Utc::now(),
        }
    }
}

/// Session file location and read/write helpers
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/tnt-roster/session.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved session, or `None` when nothing has been saved yet
    pub async fn load(&self) -> Result<Option<SessionData>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).await?;
        let session = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), "session loaded");
        Ok(Some(session))
    }

    pub async fn save(&self, session: &SessionData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(session)?;

        // temp file then rename so a crash never leaves half a file
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &self.path).await?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_means_no_session() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SessionStore::new(dir.path().join("session.json"));
        assert!(store.load().await.expect("load").is_none());
    }

    #[tokio::test]
    async fn save_load_and_clear() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));
        let user = User {
            id: 3,
            username: "sam".to_string(),
            ..User::default()
        };
        let session = SessionData::new("tok", Some(user));

        store.save(&session).await.expect("save");
        assert_eq!(store.load().await.expect("load"), Some(session));

        store.clear().await.expect("clear");
        assert!(store.load().await.expect("load").is_none());
        store.clear().await.expect("clearing twice is fine");
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").await.expect("write");

        let err = SessionStore::new(path).load().await.expect_err("corrupt");
        assert!(matches!(err, crate::error::StoreError::SessionData(_)));
    }
}
