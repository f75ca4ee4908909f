//! Solver session configuration.

use crate::builder::BuildError;
use crate::enforcement::{check_config, into_result};
use crate::parser::OutputLayout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where the solver lives, how to talk to it, and how to read its transcript.
///
/// Missing JSON fields take their defaults. Build one with
/// [`SolverConfigBuilder`](crate::builder::SolverConfigBuilder) or load it with
/// [`SolverConfig::from_json_file`]; both validate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Solver executable, resolved against `programs_dir` when set
    pub executable: String,
    pub programs_dir: Option<PathBuf>,
    /// Extra command-line arguments
    pub arguments: Vec<String>,
    /// Directory holding the input file; the solver runs here
    pub working_dir: PathBuf,
    /// Thermodynamic database answered at the first prompt
    pub database: String,
    /// Pause after each handshake line, in milliseconds
    pub settle_time_ms: u64,
    pub input_file: String,
    pub output_file: String,
    /// Capacity of the console reader channel
    pub channel_capacity: usize,
    pub layout: OutputLayout,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            executable: "theriak".to_string(),
            programs_dir: None,
            arguments: Vec::new(),
            working_dir: PathBuf::from("."),
            database: "JUN92d.bs".to_string(),
            settle_time_ms: 200,
            input_file: "THERIN".to_string(),
            output_file: "OUT".to_string(),
            channel_capacity: 1024,
            layout: OutputLayout::default(),
        }
    }
}

impl SolverConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, BuildError> {
        let config: Self = serde_json::from_str(json)?;
        into_result(check_config(&config)).map_err(BuildError::Invalid)?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BuildError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| BuildError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn settle_time(&self) -> Duration {
        Duration::from_millis(self.settle_time_ms)
    }

    pub fn resolved_executable(&self) -> PathBuf {
        match &self.programs_dir {
            Some(dir) => dir.join(&self.executable),
            None => PathBuf::from(&self.executable),
        }
    }

    pub fn input_path(&self) -> PathBuf {
        self.working_dir.join(&self.input_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.working_dir.join(&self.output_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_solver_conventions() {
        let config = SolverConfig::default();
        assert_eq!(config.database, "JUN92d.bs");
        assert_eq!(config.settle_time(), Duration::from_millis(200));
        assert_eq!(config.input_path(), PathBuf::from("./THERIN"));
        assert_eq!(config.resolved_executable(), PathBuf::from("theriak"));
    }

    #[test]
    fn programs_dir_prefixes_executable() {
        let config = SolverConfig {
            programs_dir: Some(PathBuf::from("/opt/theriak")),
            ..SolverConfig::default()
        };
        assert_eq!(
            config.resolved_executable(),
            PathBuf::from("/opt/theriak/theriak")
        );
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let json = format!(
            r#"{{"working_dir": {:?}, "database": "tcdb55c2d", "settle_time_ms": 500}}"#,
            dir.path()
        );
        let config = SolverConfig::from_json_str(&json).unwrap();

        assert_eq!(config.database, "tcdb55c2d");
        assert_eq!(config.settle_time_ms, 500);
        assert_eq!(config.output_file, "OUT");
        assert_eq!(config.layout, OutputLayout::v2025_06());
    }

    #[test]
    fn json_config_is_validated() {
        let result = SolverConfig::from_json_str(r#"{"working_dir": "/no/such/dir", "channel_capacity": 0}"#);
        match result {
            Err(BuildError::Invalid(violations)) => assert_eq!(violations.len(), 2),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            SolverConfig::from_json_str("{ not json"),
            Err(BuildError::Json(_))
        ));
    }

    #[test]
    fn config_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let config = SolverConfig {
            working_dir: dir.path().to_path_buf(),
            arguments: vec!["-v".to_string()],
            ..SolverConfig::default()
        };
        let path = dir.path().join("solver.json");
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(SolverConfig::from_json_file(&path).unwrap(), config);
        assert!(matches!(
            SolverConfig::from_json_file(dir.path().join("missing.json")),
            Err(BuildError::ReadConfig { .. })
        ));
    }
}
