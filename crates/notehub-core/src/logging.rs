//! Tracing setup.
//!
//! Logs go to a daily rolling file under `$NOTEHUB_HOME/logs/` so the TUI's
//! alternate screen is never written to. Filter with `NOTEHUB_LOG`
//! (`EnvFilter` syntax); default is `notehub=info`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::paths;

pub const LOG_ENV: &str = "NOTEHUB_LOG";
const DEFAULT_DIRECTIVES: &str = "notehub=info,notehub_core=info,notehub_tui=info";
const LOG_FILE_PREFIX: &str = "notehub.log";

/// Installs the global subscriber writing to the default logs directory.
///
/// Keep the returned guard alive until exit; dropping it flushes the writer.
pub fn init() -> Result<WorkerGuard> {
    init_in(&paths::logs_dir())
}

/// Installs the global subscriber writing to `dir`.
pub fn init_in(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(dir = %dir.display(), "logging initialized");
    Ok(guard)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}
