//! Error types for `tablestats`.
//!
//! A single error enum covers every failure the analysis can surface. Sampling
//! position failures never reach this type: they are skipped by the reader.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for `tablestats` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while analysing a table.
///
/// Error codes follow the pattern `TSTAT-XXX`.
#[derive(Error, Debug)]
pub enum Error {
    /// File missing, unreadable, or a read failed outside a sampling position (TSTAT-001).
    #[error("[TSTAT-001] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The first record could not be read as a header (TSTAT-002).
    #[error("[TSTAT-002] Failed to read header: {0}")]
    Header(String),

    /// The file has zero bytes (TSTAT-003).
    #[error("[TSTAT-003] File '{}' is empty", .0.display())]
    EmptyFile(PathBuf),

    /// Invalid sampling configuration (TSTAT-004).
    #[error("[TSTAT-004] {0}")]
    Config(#[from] ConfigError),

    /// Unrecognised file extension or unimplemented format (TSTAT-005).
    #[error("[TSTAT-005] Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// Returns the error code (e.g., "TSTAT-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "TSTAT-001",
            Self::Header(_) => "TSTAT-002",
            Self::EmptyFile(_) => "TSTAT-003",
            Self::Config(_) => "TSTAT-004",
            Self::UnsupportedFormat(_) => "TSTAT-005",
        }
    }

    /// Returns true if the file itself could not be interpreted as a table
    /// (as opposed to an environment or usage problem).
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(self, Self::Header(_) | Self::EmptyFile(_))
    }
}

/// `csv` read failures surface as I/O errors.
impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::Io(err.into())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
