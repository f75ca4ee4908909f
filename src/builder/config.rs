//! Builder for solver configurations.

use crate::builder::error::BuildError;
use crate::enforcement::{check_config, into_result};
use crate::parser::OutputLayout;
use crate::session::SolverConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Builder for [`SolverConfig`] with a fluent API.
///
/// Unset fields keep their defaults; only the working directory is required.
/// `build` validates the result and reports every violation at once.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use theriak_path::builder::SolverConfigBuilder;
///
/// let dir = std::env::temp_dir();
/// let config = SolverConfigBuilder::new()
///     .working_dir(&dir)
///     .database("tcdb55c2d")
///     .settle_time(Duration::from_millis(400))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.database, "tcdb55c2d");
/// assert_eq!(config.settle_time_ms, 400);
/// ```
#[derive(Debug, Default)]
pub struct SolverConfigBuilder {
    working_dir: Option<PathBuf>,
    config: SolverConfig,
}

impl SolverConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory holding the solver input file (required).
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn executable(mut self, executable: impl Into<String>) -> Self {
        self.config.executable = executable.into();
        self
    }

    /// Directory the executable is resolved against.
    pub fn programs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.programs_dir = Some(dir.into());
        self
    }

    /// Add one extra command-line argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.config.arguments.push(arg.into());
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.config.database = database.into();
        self
    }

    /// Pause after each handshake line. Sub-millisecond precision is dropped.
    pub fn settle_time(mut self, wait: Duration) -> Self {
        self.config.settle_time_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn input_file(mut self, name: impl Into<String>) -> Self {
        self.config.input_file = name.into();
        self
    }

    pub fn output_file(mut self, name: impl Into<String>) -> Self {
        self.config.output_file = name.into();
        self
    }

    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.config.channel_capacity = capacity;
        self
    }

    pub fn layout(mut self, layout: OutputLayout) -> Self {
        self.config.layout = layout;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<SolverConfig, BuildError> {
        let working_dir = self.working_dir.ok_or(BuildError::MissingWorkingDirectory)?;
        let config = SolverConfig {
            working_dir,
            ..self.config
        };

        into_result(check_config(&config)).map_err(BuildError::Invalid)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enforcement::ConfigViolation;

    #[test]
    fn builder_requires_working_directory() {
        let result = SolverConfigBuilder::new().build();

        assert!(matches!(result, Err(BuildError::MissingWorkingDirectory)));
    }

    #[test]
    fn fluent_api_builds_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = SolverConfigBuilder::new()
            .working_dir(dir.path())
            .programs_dir(dir.path())
            .executable("theriak.exe")
            .arg("-q")
            .input_file("THERIN2")
            .output_file("OUT2")
            .channel_capacity(16)
            .build()
            .unwrap();

        assert_eq!(config.resolved_executable(), dir.path().join("theriak.exe"));
        assert_eq!(config.arguments, vec!["-q"]);
        assert_eq!(config.input_path(), dir.path().join("THERIN2"));
        assert_eq!(config.channel_capacity, 16);
        assert_eq!(config.database, "JUN92d.bs");
    }

    #[test]
    fn builder_reports_every_violation() {
        let dir = tempfile::tempdir().unwrap();
        let result = SolverConfigBuilder::new()
            .working_dir(dir.path())
            .database("")
            .settle_time(Duration::from_micros(10))
            .channel_capacity(0)
            .build();

        match result {
            Err(BuildError::Invalid(violations)) => {
                assert_eq!(
                    violations,
                    vec![
                        ConfigViolation::EmptyDatabase,
                        ConfigViolation::ZeroSettleTime,
                        ConfigViolation::ZeroChannelCapacity,
                    ]
                );
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn invalid_error_lists_violations() {
        let err = BuildError::Invalid(vec![
            ConfigViolation::EmptyDatabase,
            ConfigViolation::ZeroSettleTime,
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid solver configuration: Thermodynamic database name is empty; \
             Settle time must be greater than zero"
        );
    }
}
