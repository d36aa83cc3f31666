pub mod auth;
pub mod jobs;
pub mod status;

use anyhow::{Context, Result};
use jobdesk_application::ClientContext;
use jobdesk_core::config::ClientConfig;
use jobdesk_core::navigation::Screen;
use jobdesk_core::notification::Notification;
use jobdesk_infrastructure::{ConfigService, FileKeyValueStore, HttpApiClient, JobdeskPaths};
use std::path::PathBuf;
use std::sync::Arc;

/// Resolved paths and configuration, before any network client exists.
pub struct Bootstrap {
    pub paths: JobdeskPaths,
    pub config: ClientConfig,
}

impl Bootstrap {
    /// Resolves the paths and the log level to start logging with, before
    /// anything that logs has run.
    pub fn logging_setup(config_dir: Option<PathBuf>) -> Result<(JobdeskPaths, String, PathBuf)> {
        let paths = JobdeskPaths::new(config_dir);
        let level = ConfigService::new(paths.clone()).log_level();
        let logs_dir = paths.logs_dir()?;
        Ok((paths, level, logs_dir))
    }

    /// Writes the default config file if needed and loads the configuration.
    pub fn load(paths: JobdeskPaths, api_url: Option<String>) -> Result<Self> {
        let config_service = ConfigService::new(paths.clone());
        config_service
            .ensure_config_file()
            .context("Failed to initialise config.toml")?;
        let config = config_service
            .load(api_url)
            .context("Failed to load configuration")?;
        Ok(Self { paths, config })
    }

    /// Builds the client context over the session file and the HTTP API.
    pub fn connect(self) -> Result<App> {
        let session_file = self.paths.session_file()?;
        let http = Arc::new(HttpApiClient::new(&self.config)?);
        tracing::debug!(api = %http.base_url(), "Connecting");

        let context = ClientContext::new(
            Arc::new(FileKeyValueStore::new(session_file)),
            http.clone(),
            http.clone(),
        );
        Ok(App { context, http })
    }
}

/// What every command operates on.
pub struct App {
    pub context: ClientContext,
    pub http: Arc<HttpApiClient>,
}

impl App {
    /// Restores the session and settles navigation, like opening the app.
    pub async fn start(&mut self) -> Screen {
        self.context.start().await
    }

    /// Starts and fails unless the client landed on a protected screen.
    pub async fn start_signed_in(&mut self) -> Result<()> {
        let screen = self.start().await;
        if screen.is_public() || self.context.session().is_none() {
            anyhow::bail!("not signed in (run `jobdesk signin` first)");
        }
        Ok(())
    }

    /// Prints pending notifications. Returns `true` if any was an error.
    pub fn flush_notifications(&mut self) -> bool {
        let notifications = self.context.drain_notifications();
        let failed = notifications.iter().any(Notification::is_error);
        crate::output::print_notifications(notifications);
        failed
    }
}
