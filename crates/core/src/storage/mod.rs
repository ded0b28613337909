//! Durable session storage
//!
//! The store is the persistence layer for authentication state; in-memory
//! session state is a read-through cache on top of it. Every mutation writes
//! through so a restart can pick up exactly where the previous process left
//! off.

use crate::error::CoreResult;
use crate::types::User;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Snapshot of an authenticated session as persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

impl StoredSession {
    /// A snapshot is only usable when both credentials survived.
    pub fn is_complete(&self) -> bool {
        !self.access_token.is_empty() && !self.refresh_token.is_empty()
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the persisted session, if any.
    async fn load(&self) -> CoreResult<Option<StoredSession>>;

    /// Persist the given session, replacing any previous one.
    async fn save(&self, session: &StoredSession) -> CoreResult<()>;

    /// Remove any persisted session. Must succeed when nothing is stored.
    async fn clear(&self) -> CoreResult<()>;
}

// Mock implementation for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub SessionStore {}

        #[async_trait]
        impl SessionStore for SessionStore {
            async fn load(&self) -> CoreResult<Option<StoredSession>>;
            async fn save(&self, session: &StoredSession) -> CoreResult<()>;
            async fn clear(&self) -> CoreResult<()>;
        }
    }
}
