//! Rolling file logger for the desktop shell.
//!
//! Installs a `tracing` subscriber that writes to size-rotated files in the
//! app's log directory and to stderr. `log` records are bridged in, so both
//! `log::info!` and `tracing::info!` end up in the same files. The last few
//! hundred lines are also kept in memory for `recent_lines`.

mod writer;

use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;

pub use writer::{RollingConfig, RollingWriter};

static LOGGER: OnceLock<RollingWriter> = OnceLock::new();

#[derive(Debug)]
pub enum LoggerError {
    Io(std::io::Error),
    Subscriber(String),
    AlreadyInitialized,
    NotInitialized,
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "log file error: {}", e),
            LoggerError::Subscriber(msg) => write!(f, "failed to install subscriber: {}", msg),
            LoggerError::AlreadyInitialized => write!(f, "logger already initialized"),
            LoggerError::NotInitialized => write!(f, "logger not initialized"),
        }
    }
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoggerError {
    fn from(e: std::io::Error) -> Self {
        LoggerError::Io(e)
    }
}

/// Local wall-clock timestamps with millisecond precision.
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Initialize with default limits. Call once, early in app setup.
pub fn init_logger(log_dir: impl Into<PathBuf>, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(log_dir, app_name, RollingConfig::default())
}

pub fn init_logger_with(
    log_dir: impl Into<PathBuf>,
    app_name: &str,
    config: RollingConfig,
) -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let writer = RollingWriter::open(log_dir, app_name, config)?;
    install(writer.clone(), app_name)?;

    LOGGER
        .set(writer)
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing::info!(target: "rolling_logger", "logging to {}", current_file().unwrap_or_default().display());
    Ok(())
}

#[cfg(not(target_os = "android"))]
fn install(writer: RollingWriter, _app_name: &str) -> Result<(), LoggerError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_timer(LocalTime)
        .with_ansi(false)
        .with_writer(writer.and(std::io::stderr))
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))
}

// logcat owns the `log` facade on Android; tracing events still go to the file.
#[cfg(target_os = "android")]
fn install(writer: RollingWriter, app_name: &str) -> Result<(), LoggerError> {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag(app_name.to_string()),
    );

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_timer(LocalTime)
        .with_ansi(false)
        .with_writer(writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LoggerError::Subscriber(e.to_string()))
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::info!(target: "app", "{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::warn!(target: "app", "{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::error!(target: "app", "{}", msg);
    Ok(())
}

/// Tail of the log, oldest first. Empty before `init_logger`.
pub fn recent_lines() -> Vec<String> {
    LOGGER
        .get()
        .map(RollingWriter::recent_lines)
        .unwrap_or_default()
}

pub fn current_file() -> Option<PathBuf> {
    LOGGER.get().map(RollingWriter::current_path)
}

fn ensure_initialized() -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        Ok(())
    } else {
        Err(LoggerError::NotInitialized)
    }
}
