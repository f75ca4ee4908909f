//! Build errors for solver configuration.

use crate::enforcement::ConfigViolation;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when building or loading a [`SolverConfig`](crate::session::SolverConfig).
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Working directory not specified. Call .working_dir(path) before .build()")]
    MissingWorkingDirectory,

    #[error("Invalid solver configuration: {}", list(.0))]
    Invalid(Vec<ConfigViolation>),

    #[error("Cannot read configuration file {path:?}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

fn list(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
