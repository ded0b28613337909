//! In-memory session store for tests and ephemeral sessions

use super::{SessionStore, StoredSession};
use crate::error::CoreResult;
use async_trait::async_trait;
use std::sync::Mutex;

/// Store that forgets everything when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Option<StoredSession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self) -> CoreResult<Option<StoredSession>> {
        Ok(self.inner.lock().expect("session store lock poisoned").clone())
    }

    async fn save(&self, session: &StoredSession) -> CoreResult<()> {
        *self.inner.lock().expect("session store lock poisoned") = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> CoreResult<()> {
        *self.inner.lock().expect("session store lock poisoned") = None;
        Ok(())
    }
}
