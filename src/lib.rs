//! KeyWarden - client library for the KeyWarden software-licensing API
//!
//! The service drives a single lifecycle, one call at a time:
//! authenticate to obtain an access key, issue an app key under that
//! session, activate the app key, then observe or update its remaining
//! activation budget. The caller owns both tokens between calls; nothing
//! is cached inside the library.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use keywarden::config::get_config;
//! use keywarden::{AppKeyManager, HttpExecutor, SessionAuthenticator};
//!
//! # async fn demo() -> keywarden::ApiResult<()> {
//! let config = get_config()?;
//! let executor = Arc::new(HttpExecutor::new(&config.api)?);
//!
//! let auth = SessionAuthenticator::new(executor.clone());
//! let manager = AppKeyManager::new(executor);
//!
//! if let Some(access_key) = auth.authenticate("alice", "pw1").await {
//!     if let Some(app_key) = manager.create_app_key(&access_key).await {
//!         let left = manager.check_app_key_activations(&app_key).await;
//!         println!("activations left: {left}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Core modules (always available)
pub mod config;
pub mod errors;

// Client components sharing the request executor
pub mod client {
    pub mod app_key;
    pub mod auth;
    pub(crate) mod envelope;
    pub mod transport;
}

pub use client::app_key::{
    AppKeyManager, UpdateContract, ACTIVATIONS_UNKNOWN, UPDATE_SUCCESS_MESSAGE,
};
pub use client::auth::{is_access_key_present, SessionAuthenticator};
pub use client::transport::{HttpExecutor, RequestExecutor};
pub use errors::{ApiError, ApiResult};
