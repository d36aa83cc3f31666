//! Tracing setup: stderr plus a daily-rotated file in the logs directory.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "jobdesk.log";

/// `RUST_LOG` when set, otherwise the configured level. Noisy HTTP crates
/// are capped at `warn`.
fn build_env_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directives = format!("{},hyper=warn,hyper_util=warn,reqwest=warn", level);
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log level '{}'", level))
}

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop, so keep it alive for
/// the lifetime of `main`.
pub fn init(level: &str, logs_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create {}", logs_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    // Warnings only on stderr unless RUST_LOG is set.
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(build_env_filter("warn")?);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_filter(build_env_filter(level)?);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
