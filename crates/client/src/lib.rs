//! Optishop storefront API client
//!
//! Typed HTTP clients for the storefront's REST backend and a
//! [`SessionManager`] implementing the authenticated session lifecycle:
//! login, registration with OTP verification, bearer-token requests with a
//! single refresh-and-retry on 401, profile management, and logout that
//! always succeeds locally.
//!
//! ```no_run
//! use optishop_client::{SessionManager, ShopConfig};
//! use optishop_core::FileStore;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), optishop_client::ClientError> {
//! let store = Arc::new(FileStore::in_data_dir("optishop")?);
//! let manager = SessionManager::new(ShopConfig::default(), store)?;
//! if !manager.restore().await? {
//!     manager.login("amara@example.com", "secret-pw").await?;
//! }
//! let user = manager.fetch_profile().await?;
//! println!("signed in as {}", user.email);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod types;

pub use config::ShopConfig;
pub use error::ClientError;
pub use http::{AuthenticatedShopClient, PublicShopClient, TypedClientBuilder};
pub use session::SessionManager;
