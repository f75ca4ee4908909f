//! Validation rules for solver configuration and bisection bounds.

use crate::enforcement::violations::ConfigViolation;
use crate::session::SolverConfig;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a rule check: success, or every violation found.
pub type Checked = Validation<(), NonEmptyVec<ConfigViolation>>;

fn require(ok: bool, violation: impl FnOnce() -> ConfigViolation) -> Checked {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Check a solver configuration, accumulating ALL violations.
pub fn check_config(config: &SolverConfig) -> Checked {
    let checks = vec![
        require(!config.executable.trim().is_empty(), || {
            ConfigViolation::EmptyExecutable
        }),
        require(config.working_dir.is_dir(), || {
            ConfigViolation::MissingWorkingDirectory {
                path: config.working_dir.clone(),
            }
        }),
        require(
            config.programs_dir.as_ref().map_or(true, |dir| dir.is_dir()),
            || ConfigViolation::MissingProgramsDirectory {
                path: config.programs_dir.clone().unwrap_or_default(),
            },
        ),
        require(!config.database.trim().is_empty(), || {
            ConfigViolation::EmptyDatabase
        }),
        require(!config.input_file.trim().is_empty(), || {
            ConfigViolation::EmptyFileName { role: "input" }
        }),
        require(!config.output_file.trim().is_empty(), || {
            ConfigViolation::EmptyFileName { role: "output" }
        }),
        require(config.input_file != config.output_file, || {
            ConfigViolation::SameInputOutput {
                name: config.input_file.clone(),
            }
        }),
        require(config.settle_time_ms > 0, || ConfigViolation::ZeroSettleTime),
        require(config.channel_capacity > 0, || {
            ConfigViolation::ZeroChannelCapacity
        }),
        require(config.layout.max_element_header_lines > 0, || {
            ConfigViolation::NoElementHeaderLines {
                version: config.layout.version.clone(),
            }
        }),
    ];

    Validation::all_vec(checks).map(|_| ())
}

/// Check bisection bounds: `tolerance >= 1` and `t_min <= t_max`.
pub fn check_bisection(t_min: i32, t_max: i32, tolerance: i32) -> Checked {
    let checks = vec![
        require(tolerance >= 1, || ConfigViolation::ToleranceTooSmall {
            tolerance,
        }),
        require(t_min <= t_max, || ConfigViolation::InvertedBounds {
            t_min,
            t_max,
        }),
    ];

    Validation::all_vec(checks).map(|_| ())
}

/// Flatten a check into a plain result carrying every violation.
pub fn into_result(checked: Checked) -> Result<(), Vec<ConfigViolation>> {
    match checked {
        Validation::Success(()) => Ok(()),
        Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
    }
}
