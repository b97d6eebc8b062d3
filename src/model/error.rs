//! Error types for versecast.
//!
//! Each concern owns a `thiserror` enum with structured fields; they compose
//! into [`AppError`] through `From` so the binary can propagate with `?`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error returned by the binary
//!   - [`LookupError`] - reference could not be resolved to verses
//!   - [`CodecError`] - a recorded message stream could not be decoded
//!   - [`ConfigError`](crate::config::ConfigError) - config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - subscriber setup failures
//!   - `std::io::Error` - reading input files
//!
//! # Recovery Strategy
//!
//! Lookup failures are reported to the operator only; the mirror keeps its
//! last valid content. Style errors are non-fatal: the offending setting is
//! dropped with a warning and the surface keeps its previous style.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reference lookup failed.
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// Message stream could not be decoded.
    #[error("Failed to decode message stream: {0}")]
    Codec(#[from] CodecError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialised.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// A verse library file could not be parsed.
    #[error("Invalid verse library at {path}: {reason}")]
    Library {
        /// Library path.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// A command needs a verse library and none was configured.
    #[error("No verse library configured; pass --library or set library_path")]
    MissingLibrary,

    /// Generic I/O failure while reading input files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Result could not be serialised for output.
    #[error("Failed to serialise output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Failure resolving a reference against the verse database.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No book matches the requested code.
    #[error("Book not found: {0}")]
    NotFound(String),

    /// The chapter or verse range lies outside the book.
    #[error("Out of range: {book} {chapter} (1-{max})")]
    OutOfRange {
        /// Book code as requested.
        book: String,
        /// Requested chapter.
        chapter: u32,
        /// Largest valid value for the out-of-range component.
        max: u32,
    },

    /// The reference text does not follow any accepted grammar.
    #[error("Malformed reference: '{0}'")]
    MalformedReference(String),
}

/// Failure decoding a JSON-lines message stream.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A line is not a valid message.
    #[error("Invalid message at line {line}: {message}")]
    InvalidMessage {
        /// 1-based line number.
        line: usize,
        /// Decoder message.
        message: String,
    },

    /// Reading the stream failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejected style change.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// Setting key is not part of the presentation style.
    #[error("Unknown setting key: {0}")]
    UnknownKey(String),

    /// Setting value has the wrong type or is out of range.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Wire name of the key.
        key: &'static str,
        /// Offending value, JSON encoded.
        value: String,
    },

    /// Color is not a `#rrggbb` string.
    #[error("Invalid color: '{0}'")]
    InvalidColor(String),
}
