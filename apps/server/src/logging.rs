//! Logging setup
//!
//! Console output (plain or JSON) filtered by `RUST_LOG` or the configured
//! level, plus an optional rolling log file written from a background thread.

use crate::config::LoggingConfig;
use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the file writer flushing until dropped. Hold it for the process lifetime.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

fn rotation(name: &str) -> anyhow::Result<Rotation> {
    match name {
        "daily" => Ok(Rotation::DAILY),
        "hourly" => Ok(Rotation::HOURLY),
        "minutely" => Ok(Rotation::MINUTELY),
        "never" => Ok(Rotation::NEVER),
        other => anyhow::bail!("Unknown log rotation '{other}'"),
    }
}

/// Install the global subscriber.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<LoggingGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("Invalid log level '{}'", config.level))?;

    let (plain, json) = if config.json {
        (None, Some(fmt::layer().json().with_target(true)))
    } else {
        (Some(fmt::layer().with_target(true)), None)
    };

    let (file, guard) = if config.file_enabled {
        let appender = RollingFileAppender::builder()
            .rotation(rotation(&config.file_rotation)?)
            .filename_prefix(&config.file_prefix)
            .filename_suffix("log")
            .build(&config.file_directory)
            .with_context(|| {
                format!("Failed to open log directory '{}'", config.file_directory)
            })?;
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (
            Some(fmt::layer().with_writer(writer).with_ansi(false)),
            Some(guard),
        )
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .with(file)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LoggingGuard { _file: guard })
}
