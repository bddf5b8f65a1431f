use std::path::Path;

use tracing::{debug, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::error::{GameError, Result};

pub const LOG_FILE: &str = "sharktype.log";

/// `RUST_LOG` wins; otherwise debug builds log at debug and release at info.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    })
}

/// Logs go to a daily file; the terminal belongs to the TUI.
pub fn setup_logging(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(file_appender)
        .with_ansi(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| GameError::Logging(e.to_string()))?;

    info!(dir = %log_dir.display(), "logging initialized");
    debug!(
        "debug logging {}",
        if cfg!(debug_assertions) { "enabled" } else { "disabled" }
    );
    Ok(())
}
