//! Optishop core types and utilities
//!
//! Domain types for the storefront API, input validation, and the durable
//! session store used to carry authentication state across restarts.

pub mod error;
pub mod storage;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult};
pub use storage::{FileStore, MemoryStore, SessionStore, StoredSession};
pub use types::{FaceShape, Profile, Session, User, UserRole};
