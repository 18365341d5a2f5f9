use std::fs;

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

const LOG_FILE_NAME: &str = "quizgen.log";

/// Sets up file-only logging with daily rotation.
///
/// The terminal belongs to the UI, so nothing is written to stdout/stderr.
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init(config: &LoggingConfig) -> Result<WorkerGuard> {
    fs::create_dir_all(&config.directory).with_context(|| {
        format!(
            "Could not create log directory {}",
            config.directory.display()
        )
    })?;

    let env_filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::daily(&config.directory, LOG_FILE_NAME);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(non_blocking_file);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Logging was already initialized")?;

    info!(
        directory = %config.directory.display(),
        file = LOG_FILE_NAME,
        "Logging initialized"
    );
    Ok(guard)
}
