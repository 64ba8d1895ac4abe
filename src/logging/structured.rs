//! Subscriber setup for the `meteo` binary
//!
//! Human-readable events go to stderr. A run can also leave a JSON trail in
//! `<local_path>/meteo.log`, rotated by `tracing-appender`, so scheduled
//! updates can be audited after the fact.

use crate::config::LoggingConfig;
use crate::domain::{MeteoError, Result};
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// File name of the JSON run log, before rotation suffixes
pub const LOG_FILE_NAME: &str = "meteo.log";

/// Flushes the JSON run log when dropped
///
/// `main` drops it explicitly before `process::exit`.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Installs the global subscriber
///
/// `RUST_LOG`, when set, wins over `level`.
///
/// # Errors
///
/// Fails on an unknown level or rotation, when the log directory cannot be
/// created, or when a subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use meteo::logging::init_logging;
/// use meteo::config::LoggingConfig;
///
/// let _guard = init_logging("debug", &LoggingConfig::console_only())
///     .expect("Failed to initialize logging");
/// ```
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("meteo={level}")));

    let console = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(filter.clone())
        .boxed();

    let (run_log, file_guard) = match run_log_layer(config, filter)? {
        Some((layer, guard)) => (Some(layer), Some(guard)),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(run_log)
        .try_init()
        .map_err(|e| MeteoError::Configuration(format!("Failed to install logger: {e}")))?;

    tracing::debug!(
        run_log = config.local_enabled,
        directory = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// JSON layer writing to the rotated run log, if enabled
fn run_log_layer<S>(
    config: &LoggingConfig,
    filter: EnvFilter,
) -> Result<Option<(BoxedLayer<S>, WorkerGuard)>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if !config.local_enabled {
        return Ok(None);
    }

    let rotation = parse_rotation(&config.local_rotation)?;
    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        MeteoError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            config.local_path
        ))
    })?;

    let appender = RollingFileAppender::new(rotation, &config.local_path, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_writer(writer)
        .with_filter(filter)
        .boxed();

    Ok(Some((layer, guard)))
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(MeteoError::Configuration(format!(
            "Invalid log level: {level}. Must be one of: trace, debug, info, warn, error"
        ))),
    }
}

fn parse_rotation(rotation: &str) -> Result<Rotation> {
    match rotation {
        "daily" => Ok(Rotation::DAILY),
        "hourly" => Ok(Rotation::HOURLY),
        "never" => Ok(Rotation::NEVER),
        other => Err(MeteoError::Configuration(format!(
            "Invalid log rotation: {other}. Must be one of: daily, hourly, never"
        ))),
    }
}
