//! Errors raised while reading a configuration file
//!
//! A [`SourceError`] never escapes store construction: the loader reports it,
//! the store logs it and falls back to an empty layer.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a configuration file into a source layer.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file could not be read (missing, unreadable, not UTF-8).
    #[error("cannot read properties file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("invalid JSON in properties file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed, but the top level is not a JSON object.
    #[error("properties file {} does not contain a JSON object", .path.display())]
    NotAnObject { path: PathBuf },
}

impl SourceError {
    /// Whether the failure is a plain missing file, as opposed to a file
    /// that exists but cannot be used.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SourceError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
