//! Unified path management for jobdesk files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/jobdesk/           # Config directory
//! ├── config.toml              # ClientConfig
//! ├── session.toml             # Persisted access_token / user_id (0600)
//! └── logs/                    # Application logs
//!     └── jobdesk.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "jobdesk";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for jobdesk_core::JobdeskError {
    fn from(e: PathError) -> Self {
        jobdesk_core::JobdeskError::config(e.to_string())
    }
}

/// Path resolver for jobdesk files.
///
/// By default everything lives under the platform config directory
/// (`dirs::config_dir()/jobdesk`). An explicit base directory replaces it
/// entirely, which is what tests and `--config-dir` use.
#[derive(Debug, Clone, Default)]
pub struct JobdeskPaths {
    base_dir: Option<PathBuf>,
}

impl JobdeskPaths {
    /// Creates a resolver, optionally rooted at `base_dir`.
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// Returns the jobdesk configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to config.toml.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session key/value file.
    ///
    /// # Security Note
    ///
    /// This file holds the bearer token. It is written with 600 permissions
    /// on Unix.
    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("session.toml"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}
