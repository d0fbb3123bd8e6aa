//! Process-wide tracing setup for the `wayfarer` binary.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use wayfarer_core::config::LoggingSettings;
use wayfarer_infrastructure::WayfarerPaths;

const LOG_FILE_PREFIX: &str = "wayfarer.log";

/// Installs the global subscriber: stderr output (plain or JSON) plus a
/// daily rolling file in the logs directory.
///
/// `RUST_LOG` wins over `logging.level`. The returned guard must be held
/// until exit so buffered file output is flushed.
pub fn init(settings: &LoggingSettings, paths: &WayfarerPaths) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .with_context(|| format!("Invalid log level '{}'", settings.level))?;

    let logs_dir = paths.logs_dir()?;
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create {}", logs_dir.display()))?;
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&logs_dir, LOG_FILE_PREFIX));

    let json = settings.json;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
