use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FaultlineError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("failed to parse failure dump from {origin}: {message}")]
    DumpParse { origin: String, message: String },

    #[error("invalid {field} pattern {pattern:?}: {source}")]
    InvalidPattern {
        field: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Reasons a failed source line could not be shown. Never surfaced to the
/// user as an error: the presenter turns each into a stand-in line.
#[derive(Debug, Error)]
pub enum SourceLineError {
    #[error("Unable to find {path} to read failed line")]
    NoSuchFile { path: String },

    #[error("Unable to find matching line in {path}")]
    NoSuchLine { path: String, line: usize },

    #[error("Unable to read failed line")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
