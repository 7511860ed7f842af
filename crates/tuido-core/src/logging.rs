//! Tracing setup.
//!
//! Headless commands log to stderr; the TUI writes to a log file under the
//! tuido home directory because stdout/stderr belong to the alternate
//! screen. Filtering is controlled by the `TUIDO_LOG` env var.

use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "tuido.log";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env("TUIDO_LOG").unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initializes stderr logging for headless (non-TUI) commands.
pub fn init_headless() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))?;
    Ok(())
}

/// Initializes file logging for the TUI.
///
/// Returns the appender guard; dropping it flushes buffered log lines, so
/// the caller must hold it for the lifetime of the TUI.
pub fn init_tui(logs_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)?;
    let appender = tracing_appender::rolling::never(logs_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))?;
    Ok(guard)
}
