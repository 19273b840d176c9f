//! Tracing subscriber setup.
//!
//! Filter directives come from `CHAPVIEW_LOG` (same syntax as `RUST_LOG`).
//! The dashboard owns the terminal, so it logs to a file; one-shot commands
//! log to stderr.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CHAPVIEW_LOG";

/// Log file name inside the logs directory.
pub const LOG_FILE: &str = "chapview.log";

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Logs to stderr. Defaults to warnings only so command output stays clean.
pub fn init_stderr() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("Failed to install stderr logger")
}

/// Logs to `<dir>/chapview.log`.
///
/// The returned guard flushes buffered lines on drop; keep it alive for the
/// lifetime of the dashboard.
pub fn init_file(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("Failed to install file logger")?;

    Ok(guard)
}
