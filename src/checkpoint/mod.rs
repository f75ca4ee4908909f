//! Saving and reloading computed paths.
//!
//! A [`RunArchive`] wraps a [`StateHistory`] with a format version, a unique
//! id and a timestamp, so a long path can be reported on later without
//! running the solver again. Archives serialize to JSON or to a compact
//! binary form.

use crate::core::StateHistory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

pub mod error;

pub use error::ArchiveError;

/// Version identifier for archive format
pub const ARCHIVE_VERSION: u32 = 1;

/// On-disk encoding of an archive file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    Json,
    Binary,
}

/// Serializable record of one computed path.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunArchive {
    /// Archive format version
    pub version: u32,

    /// Unique archive identifier
    pub id: String,

    /// When the archive was created
    pub created_at: DateTime<Utc>,

    /// Free-form description of the run
    pub label: String,

    /// The computed steps
    pub history: StateHistory,
}

impl RunArchive {
    pub fn new(label: impl Into<String>, history: StateHistory) -> Self {
        Self {
            version: ARCHIVE_VERSION,
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            label: label.into(),
            history,
        }
    }

    pub fn to_json(&self) -> Result<String, ArchiveError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ArchiveError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, ArchiveError> {
        let archive: Self = serde_json::from_str(json)
            .map_err(|e| ArchiveError::DeserializationFailed(e.to_string()))?;
        archive.check_version()
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, ArchiveError> {
        bincode::serialize(self).map_err(|e| ArchiveError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, ArchiveError> {
        let archive: Self = bincode::deserialize(bytes)
            .map_err(|e| ArchiveError::DeserializationFailed(e.to_string()))?;
        archive.check_version()
    }

    /// Write the archive to `path` in the given format.
    pub fn save(&self, path: impl AsRef<Path>, format: ArchiveFormat) -> Result<(), ArchiveError> {
        let path = path.as_ref();
        let bytes = match format {
            ArchiveFormat::Json => self.to_json()?.into_bytes(),
            ArchiveFormat::Binary => self.to_binary()?,
        };
        fs::write(path, bytes).map_err(|source| ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = ?path, id = %self.id, steps = self.history.len(), "archive saved");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>, format: ArchiveFormat) -> Result<Self, ArchiveError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match format {
            ArchiveFormat::Json => {
                let json = String::from_utf8(bytes)
                    .map_err(|e| ArchiveError::DeserializationFailed(e.to_string()))?;
                Self::from_json(&json)
            }
            ArchiveFormat::Binary => Self::from_binary(&bytes),
        }
    }

    fn check_version(self) -> Result<Self, ArchiveError> {
        if self.version == ARCHIVE_VERSION {
            Ok(self)
        } else {
            Err(ArchiveError::UnsupportedVersion {
                found: self.version,
                supported: ARCHIVE_VERSION,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StepResult;
    use crate::parser::fixtures::TRANSCRIPT;
    use crate::parser::OutputParser;

    fn archive() -> RunArchive {
        let output = OutputParser::default().parse(TRANSCRIPT);
        let history = StateHistory::new()
            .record(StepResult::from_output(0, 5000, 600, &output))
            .record(StepResult::from_output(1, 5000, 650, &output));
        RunArchive::new("dehydration", history)
    }

    #[test]
    fn new_archive_has_version_and_unique_id() {
        let a = archive();
        let b = archive();
        assert_eq!(a.version, ARCHIVE_VERSION);
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn json_round_trip_keeps_steps() {
        let original = archive();
        let restored = RunArchive::from_json(&original.to_json().unwrap()).unwrap();

        assert_eq!(restored.id, original.id);
        assert_eq!(restored.label, "dehydration");
        assert_eq!(restored.history.len(), 2);
        assert_eq!(
            restored.history.steps()[1].phase_names(),
            original.history.steps()[1].phase_names()
        );
    }

    #[test]
    fn binary_round_trip_is_exact() {
        let original = archive();
        let restored = RunArchive::from_binary(&original.to_binary().unwrap()).unwrap();

        assert_eq!(restored.history, original.history);
        assert_eq!(restored.created_at, original.created_at);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut archive = archive();
        archive.version = 99;
        let json = archive.to_json().unwrap();

        assert!(matches!(
            RunArchive::from_json(&json),
            Err(ArchiveError::UnsupportedVersion {
                found: 99,
                supported: 1
            })
        ));
    }

    #[test]
    fn garbage_fails_to_deserialize() {
        assert!(matches!(
            RunArchive::from_json("{}"),
            Err(ArchiveError::DeserializationFailed(_))
        ));
        assert!(RunArchive::from_binary(&[1, 2, 3]).is_err());
    }

    #[test]
    fn save_and_load_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let original = archive();

        for (name, format) in [("run.json", ArchiveFormat::Json), ("run.bin", ArchiveFormat::Binary)] {
            let path = dir.path().join(name);
            original.save(&path, format).unwrap();
            let loaded = RunArchive::load(&path, format).unwrap();
            assert_eq!(loaded.id, original.id);
            assert_eq!(loaded.history.len(), 2);
        }

        assert!(matches!(
            RunArchive::load(dir.path().join("missing.json"), ArchiveFormat::Json),
            Err(ArchiveError::Io { .. })
        ));
    }
}
