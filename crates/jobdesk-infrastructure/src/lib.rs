//! Infrastructure layer for Jobdesk: file storage, configuration loading,
//! local file inspection and the HTTP API client.

pub mod config_service;
pub mod file_source;
pub mod http;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::http::HttpApiClient;
pub use crate::paths::JobdeskPaths;
pub use crate::storage::FileKeyValueStore;
