//! `progress.json` in the data directory.

use super::{ProgressStore, StoreError};
use std::fs;
use std::path::{Path, PathBuf};
use study_core::ProgressData;

pub const PROGRESS_FILE: &str = "progress.json";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(PROGRESS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> ProgressData {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no progress file yet");
                return ProgressData::default();
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "unreadable progress file");
                return ProgressData::default();
            }
        };

        serde_json::from_str(&text).unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "corrupt progress file");
            ProgressData::default()
        })
    }

    fn save(&self, data: &ProgressData) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, json).map_err(io_err)?;

        tracing::debug!(path = %self.path.display(), quizzes = data.quizzes.len(), "saved progress");
        Ok(())
    }
}
