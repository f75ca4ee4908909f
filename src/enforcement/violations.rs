//! Configuration and search-bound violations.

use std::path::PathBuf;
use thiserror::Error;

/// A single broken rule. Checks report every violation they find, not just the first.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("Solver executable name is empty")]
    EmptyExecutable,

    #[error("Working directory {path:?} does not exist")]
    MissingWorkingDirectory { path: PathBuf },

    #[error("Programs directory {path:?} does not exist")]
    MissingProgramsDirectory { path: PathBuf },

    #[error("Thermodynamic database name is empty")]
    EmptyDatabase,

    #[error("The {role} file name is empty")]
    EmptyFileName { role: &'static str },

    #[error("Input and output files are both named '{name}'")]
    SameInputOutput { name: String },

    #[error("Settle time must be greater than zero")]
    ZeroSettleTime,

    #[error("Reader channel capacity must be greater than zero")]
    ZeroChannelCapacity,

    #[error("Layout '{version}' allows no element header lines")]
    NoElementHeaderLines { version: String },

    #[error("Bisection tolerance must be at least 1 (got {tolerance})")]
    ToleranceTooSmall { tolerance: i32 },

    #[error("Lower temperature bound {t_min} exceeds upper bound {t_max}")]
    InvertedBounds { t_min: i32, t_max: i32 },
}
