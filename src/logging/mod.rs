//! Tracing subscriber initialization.
//!
//! The operator's log goes to a file so it never interleaves with command
//! output; `--log-stderr` sends it to stderr instead for one-off runs.
//! Respects `RUST_LOG`, defaulting to [`DEFAULT_FILTER`].

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Log path has no parent directory
    #[error("Log path has no parent directory: {0:?}")]
    NoParentDirectory(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    /// Append to a file, creating its directory if needed.
    File(PathBuf),
    /// Write to stderr.
    Stderr,
}

/// Split a log path into the directory and file name the appender wants.
///
/// A bare file name resolves to the current directory.
pub fn log_target(log_path: &Path) -> Result<(&Path, &str), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = log_path
        .parent()
        .ok_or_else(|| LoggingError::NoParentDirectory(log_path.to_path_buf()))?;
    let directory = if directory.as_os_str().is_empty() {
        Path::new(".")
    } else {
        directory
    };

    Ok((directory, file_name))
}

/// `RUST_LOG` if it parses, otherwise `default_directive`.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Fails if the log directory cannot be created, the path has no file name,
/// or a subscriber is already installed. The directory is created before
/// the subscriber is installed.
pub fn init(output: &LogOutput) -> Result<(), LoggingError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .with_ansi(false);

    match output {
        LogOutput::File(log_path) => {
            let (directory, file_name) = log_target(log_path)?;
            std::fs::create_dir_all(directory).map_err(|source| {
                LoggingError::DirectoryCreation {
                    path: directory.to_path_buf(),
                    source,
                }
            })?;
            let file_appender = tracing_appender::rolling::never(directory, file_name);
            builder
                .with_writer(file_appender)
                .try_init()
                .map_err(|_| LoggingError::SubscriberAlreadySet)
        }
        LogOutput::Stderr => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|_| LoggingError::SubscriberAlreadySet),
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
