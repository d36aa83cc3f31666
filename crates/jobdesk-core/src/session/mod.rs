//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: `Session`, `Credentials` and the API's `AuthGrant`
//! - `storage`: `KeyValueStore` persistence trait and the fixed keys
//! - `api`: `AuthApi` trait for the remote auth endpoints
//!
//! # Usage
//!
//! ```ignore
//! use jobdesk_core::session::{Session, KeyValueStore, AuthApi};
//! ```

mod api;
mod model;
mod storage;

// Re-export public API
pub use api::AuthApi;
pub use model::{AuthGrant, Credentials, Session};
pub use storage::{ACCESS_TOKEN_KEY, KeyValueStore, MemoryKeyValueStore, USER_ID_KEY};
