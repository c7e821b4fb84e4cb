//! Logging infrastructure for poststats
//!
//! Logs go to daily files named `poststats.log.YYYY-MM-DD` under the XDG
//! state directory (`~/.local/state/poststats/`).

use crate::config::{Config, LoggingConfig};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Prefix of every log file; the appender adds the date.
pub const LOG_FILE_PREFIX: &str = "poststats.log";

/// Initialize the logging system
///
/// Sets up tracing with:
/// - File output to the XDG state directory
/// - Daily rotation, keeping at most `config.max_files` files
/// - Level from `RUST_LOG` if set, else `config.level`
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard> {
    init_in(config, Config::state_dir())
}

/// Same as [`init`], writing into `log_dir`.
pub fn init_in(config: &LoggingConfig, log_dir: PathBuf) -> Result<LoggingGuard> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(&config.level)?,
    };

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .max_log_files(config.max_files.max(1))
        .build(&log_dir)
        .map_err(|e| Error::Config(format!("failed to open log file in {}: {e}", log_dir.display())))?;
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .map_err(|e| Error::Config(format!("logging already initialized: {e}")))?;

    tracing::info!(log_dir = %log_dir.display(), level = %config.level, "Logging initialized");

    Ok(LoggingGuard {
        log_dir,
        _worker: guard,
    })
}

/// Parse a configured level or directive list (`info`, `poststats_core=debug`).
pub fn level_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| Error::Config(format!("invalid logging.level {level:?}: {e}")))
}

/// Initialize logging for tests (logs to stdout)
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

/// Keeps the background log writer alive; pending lines are flushed on drop.
pub struct LoggingGuard {
    log_dir: PathBuf,
    _worker: tracing_appender::non_blocking::WorkerGuard,
}

impl LoggingGuard {
    /// Directory the log files are written to.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}
