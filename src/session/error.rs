//! Session error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort one solver step.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot read solver input file {path:?}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write solver input file {path:?}: {source}")]
    WriteInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot remove stale output file {path:?}: {source}")]
    RemoveStaleOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to launch solver {program:?}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Solver {stream} was not captured")]
    MissingPipe { stream: &'static str },

    #[error("Failed to send '{input}' to the solver: {source}")]
    Handshake {
        input: String,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read solver output file {path:?}: {source}")]
    ReadOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
