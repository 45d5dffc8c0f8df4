//! Subjects listed in a `manifest.json` index.

use super::{
    read_markdown, ContentError, ContentSource, DirectoryContentSource, Manifest, SubjectEntry,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads the subject list from a manifest. Topic files are resolved against
/// the manifest's directory. When the manifest cannot be read the subjects
/// directory is scanned instead.
#[derive(Debug, Clone)]
pub struct ManifestContentSource {
    manifest_path: PathBuf,
    base: PathBuf,
    fallback: DirectoryContentSource,
}

impl ManifestContentSource {
    pub fn new(manifest_path: impl Into<PathBuf>, subjects_dir: impl Into<PathBuf>) -> Self {
        let manifest_path = manifest_path.into();
        let base = manifest_dir(&manifest_path);
        Self {
            fallback: DirectoryContentSource::with_base(subjects_dir, base.clone()),
            manifest_path,
            base,
        }
    }

    pub async fn load_manifest(&self) -> Result<Manifest, ContentError> {
        let text = tokio::fs::read_to_string(&self.manifest_path)
            .await
            .map_err(|err| ContentError::io(&self.manifest_path, err))?;
        serde_json::from_str(&text).map_err(|source| ContentError::Manifest {
            path: self.manifest_path.clone(),
            source,
        })
    }
}

#[async_trait]
impl ContentSource for ManifestContentSource {
    async fn list_subjects(&self) -> Result<Vec<SubjectEntry>, ContentError> {
        match self.load_manifest().await {
            Ok(manifest) => Ok(manifest.subjects),
            Err(err) => {
                tracing::warn!(error = %err, "falling back to directory scan");
                self.fallback.list_subjects().await
            }
        }
    }

    async fn fetch_topic_markdown(&self, file: &str) -> Result<String, ContentError> {
        read_markdown(&self.base, file).await
    }
}

/// Scan `subjects_dir` and write the manifest, with topic paths relative to
/// the manifest's directory.
pub async fn write_manifest(
    subjects_dir: &Path,
    manifest_path: &Path,
) -> Result<Manifest, ContentError> {
    let base = manifest_dir(manifest_path);
    let subjects = DirectoryContentSource::with_base(subjects_dir, &base)
        .list_subjects()
        .await?;
    let manifest = Manifest { subjects };

    if !base.as_os_str().is_empty() {
        tokio::fs::create_dir_all(&base)
            .await
            .map_err(|err| ContentError::io(&base, err))?;
    }

    let json = serde_json::to_string_pretty(&manifest).map_err(|source| ContentError::Manifest {
        path: manifest_path.to_path_buf(),
        source,
    })?;
    tokio::fs::write(manifest_path, json)
        .await
        .map_err(|err| ContentError::io(manifest_path, err))?;

    tracing::info!(
        path = %manifest_path.display(),
        subjects = manifest.subjects.len(),
        "wrote manifest"
    );
    Ok(manifest)
}

fn manifest_dir(manifest_path: &Path) -> PathBuf {
    manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}
