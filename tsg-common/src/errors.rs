//! Error taxonomy for Test Status Grid.
//!
//! Every failure surfaces to the immediate caller; there is no retry layer
//! and no partial-success state. An operation either fully succeeds (matrix
//! updated, file written) or it fails and leaves prior persisted state
//! untouched.

use std::path::PathBuf;

/// Errors that can occur while updating, persisting, or rendering a status matrix.
#[derive(Debug, thiserror::Error)]
pub enum TsgError {
    /// Requested export format is not in the supported whitelist.
    #[error("unsupported export format {requested:?} (supported: {supported:?})")]
    UnsupportedFormat {
        requested: String,
        supported: Vec<&'static str>,
    },

    /// A persisted row key could not be parsed as a calendar date.
    #[error("malformed date {value:?} in status file: {source}")]
    MalformedDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A persisted cell held something other than `0` or `1`.
    #[error("malformed cell value {value:?} in column {column:?} (expected 0 or 1)")]
    MalformedCell { column: String, value: String },

    /// A persisted data row did not match the header's column count.
    #[error("row {line} has {found} cells, header declares {expected}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A day's failed set named tests absent from the known-test universe.
    #[error("failed tests not in the known set: {tests:?}")]
    UnknownFailedTests { tests: Vec<String> },

    /// A test identifier cannot be represented in the persisted table.
    #[error("invalid test identifier {name:?}: must be non-empty and free of commas and line breaks")]
    InvalidTestIdentifier { name: String },

    /// Configuration file exists but is not valid TOML for [`crate::config::TsgConfig`].
    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    /// Underlying file I/O failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TsgError>;

impl TsgError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
