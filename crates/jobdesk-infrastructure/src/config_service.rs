//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from `config.toml` and applies the
//! `JOBDESK_API_BASE_URL` environment override.

use crate::paths::JobdeskPaths;
use crate::storage::AtomicTomlFile;
use jobdesk_core::Result;
use jobdesk_core::config::{API_BASE_URL_ENV, ClientConfig};

/// Resolves the effective client configuration.
///
/// Precedence, highest first:
/// 1. explicit override (the CLI's `--api-url`)
/// 2. `JOBDESK_API_BASE_URL`
/// 3. `config.toml`
/// 4. built-in defaults
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: JobdeskPaths,
}

impl ConfigService {
    pub fn new(paths: JobdeskPaths) -> Self {
        Self { paths }
    }

    /// Loads the configuration, reading the environment for the base URL.
    pub fn load(&self, api_url_override: Option<String>) -> Result<ClientConfig> {
        let env_url = std::env::var(API_BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty());
        self.load_with(api_url_override.or(env_url))
    }

    /// Loads the configuration with an already-resolved base URL override.
    pub fn load_with(&self, api_url: Option<String>) -> Result<ClientConfig> {
        let config_path = self.paths.config_file()?;
        let file = AtomicTomlFile::<ClientConfig>::new(config_path.clone());

        let mut config = match file.load()? {
            Some(config) => {
                tracing::debug!("Loaded config from {}", config_path.display());
                config
            }
            None => {
                tracing::debug!(
                    "No config at {}, using defaults",
                    config_path.display()
                );
                ClientConfig::default()
            }
        };

        if let Some(url) = api_url {
            config = config.with_api_base_url(url);
        }

        config.validated()
    }

    /// The configured log level, read without logging or writing anything.
    ///
    /// Falls back to the default when the file is missing or unreadable;
    /// [`ConfigService::load`] reports those problems once logging is up.
    pub fn log_level(&self) -> String {
        self.paths
            .config_file()
            .ok()
            .and_then(|path| AtomicTomlFile::<ClientConfig>::new(path).load().ok().flatten())
            .map(|config| config.log_level)
            .unwrap_or_else(|| ClientConfig::default().log_level)
    }

    /// Writes a default config.toml if none exists yet.
    pub fn ensure_config_file(&self) -> Result<()> {
        let config_path = self.paths.config_file()?;
        if config_path.exists() {
            return Ok(());
        }
        AtomicTomlFile::<ClientConfig>::new(config_path.clone()).save(&ClientConfig::default())?;
        tracing::info!("Created default config at {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobdesk_core::JobdeskError;
    use jobdesk_core::config::DEFAULT_API_BASE_URL;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> ConfigService {
        ConfigService::new(JobdeskPaths::new(Some(dir.path().to_path_buf())))
    }

    #[test]
    fn test_defaults_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = service(&temp_dir).load_with(None).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_file_values_are_used() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("config.toml"),
            "api_base_url = \"https://jobs.example.com/\"\nrequest_timeout_secs = 5\n",
        )
        .unwrap();

        let config = service(&temp_dir).load_with(None).unwrap();
        assert_eq!(config.api_base_url, "https://jobs.example.com");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_override_beats_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("config.toml"),
            "api_base_url = \"https://jobs.example.com\"\n",
        )
        .unwrap();

        let config = service(&temp_dir)
            .load_with(Some("http://127.0.0.1:9000".to_string()))
            .unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "api_base_url = ").unwrap();

        let err = service(&temp_dir).load_with(None).unwrap_err();
        assert!(matches!(err, JobdeskError::Storage(_)));
    }

    #[test]
    fn test_ensure_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        service.ensure_config_file().unwrap();

        assert!(temp_dir.path().join("config.toml").exists());
        let config = service.load_with(None).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_log_level_reads_file_without_creating_it() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        assert_eq!(service.log_level(), "info");
        assert!(!temp_dir.path().join("config.toml").exists());

        std::fs::write(temp_dir.path().join("config.toml"), "log_level = \"debug\"\n").unwrap();
        assert_eq!(service.log_level(), "debug");

        std::fs::write(temp_dir.path().join("config.toml"), "log_level = ").unwrap();
        assert_eq!(service.log_level(), "info");
    }

    #[test]
    fn test_zero_timeout_in_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "request_timeout_secs = 0\n").unwrap();

        let err = service(&temp_dir).load_with(None).unwrap_err();
        assert!(matches!(err, JobdeskError::Config(_)));
    }
}
