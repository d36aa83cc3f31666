//! Domain layer for Jobdesk.
//!
//! Framework-free types and traits shared by the infrastructure, application
//! and CLI crates.

pub mod config;
pub mod error;
pub mod job;
pub mod navigation;
pub mod notification;
pub mod session;
pub mod upload;

mod serde_ids;

// Re-export common error type
pub use error::{JobdeskError, Result};
