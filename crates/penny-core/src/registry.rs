//! Versioned model artifact storage
//!
//! The registry owns one file, `model.json`, holding the latest trained
//! model plus its metadata. Writes go through a temp file in the same
//! directory and an atomic rename, so a crash mid-save leaves the previous
//! artifact intact. Version history lives in the database, not on disk.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::classifier::TrainedModel;
use crate::error::{Error, Result};

const ARTIFACT_FILE: &str = "model.json";

/// A trained model plus the metadata describing how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: i64,
    pub accuracy: f64,
    pub corrections_applied: i64,
    pub created_at: DateTime<Utc>,
    pub model: TrainedModel,
}

/// Loads and saves model artifacts under a single directory.
pub struct ModelRegistry {
    dir: PathBuf,
}

impl ModelRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default artifact directory under the platform data dir
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("penny")
            .join("model")
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.dir.join(ARTIFACT_FILE)
    }

    /// Load the current artifact
    ///
    /// A missing file returns `Ok(None)`. So does a file that fails to
    /// parse: an unreadable artifact is treated like no artifact, and the
    /// caller rebuilds from seed data rather than refusing to start.
    pub fn load(&self) -> Result<Option<ModelArtifact>> {
        let path = self.artifact_path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<ModelArtifact>(&contents) {
            Ok(artifact) => {
                info!(
                    version = artifact.version,
                    path = %path.display(),
                    "Loaded model artifact"
                );
                Ok(Some(artifact))
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Model artifact unreadable, will retrain from scratch"
                );
                Ok(None)
            }
        }
    }

    /// Save an artifact atomically
    ///
    /// The temp file must live in the artifact directory: rename is only
    /// atomic within a filesystem.
    pub fn save(&self, artifact: &ModelArtifact) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let temp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer(temp.as_file(), artifact)?;

        let path = self.artifact_path();
        temp.persist(&path)
            .map_err(|e| Error::Persistence(format!("Failed to store model artifact: {}", e)))?;

        info!(
            version = artifact.version,
            path = %path.display(),
            "Saved model artifact"
        );
        Ok(())
    }

    /// Remove the stored artifact if present
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(self.artifact_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    #[cfg(test)]
    pub(crate) fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}
