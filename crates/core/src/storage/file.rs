//! JSON-file session store
//!
//! The native equivalent of the storefront web client's durable key/value
//! storage: one JSON document under the platform data directory. A corrupt or
//! unreadable file loads as "no session" so startup never fails on bad state.

use super::{SessionStore, StoredSession};
use crate::error::{CoreError, CoreResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform data directory, e.g.
    /// `~/.local/share/<app>/session.json` on Linux.
    pub fn in_data_dir(app_name: &str) -> CoreResult<Self> {
        let base = dirs::data_dir()
            .ok_or_else(|| CoreError::storage_error("no platform data directory available"))?;
        Ok(Self::new(base.join(app_name).join(SESSION_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn load(&self) -> CoreResult<Option<StoredSession>> {
        match tokio::fs::read(&self.path).await {
            // Corrupt content is treated as absent, not fatal
            Ok(bytes) => Ok(serde_json::from_slice(&bytes).ok()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, session: &StoredSession) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(session)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }

    async fn clear(&self) -> CoreResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::sample_session;
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join(SESSION_FILE));
        (dir, store)
    }

    #[tokio::test]
    async fn missing_file_loads_as_none() {
        let (_dir, store) = temp_store();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_creates_parents_and_round_trips() {
        let (_dir, store) = temp_store();
        let session = sample_session();
        store.save(&session).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn corrupt_file_loads_as_none() {
        let (_dir, store) = temp_store();
        tokio::fs::create_dir_all(store.path().parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(store.path(), b"{not json").await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let (_dir, store) = temp_store();
        store.clear().await.unwrap();
        store.save(&sample_session()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        store.clear().await.unwrap();
    }
}
