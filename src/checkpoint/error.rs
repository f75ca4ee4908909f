//! Archive error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while saving or loading a run archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Archive version is not supported by this version
    #[error("Unsupported archive version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Archive file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
