//! Path computation errors.

use crate::core::CommandError;
use crate::enforcement::ConfigViolation;
use crate::session::SessionError;
use thiserror::Error;

/// Errors that abort a path, a single step, or a bisection.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Pressure path has {pressures} points but temperature path has {temperatures}")]
    LengthMismatch {
        pressures: usize,
        temperatures: usize,
    },

    #[error("Path has {steps} steps but {bulks} bulk compositions were given")]
    BulkCountMismatch { steps: usize, bulks: usize },

    #[error("Invalid bisection bounds: {}", list(.0))]
    InvalidBounds(Vec<ConfigViolation>),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

fn list(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
