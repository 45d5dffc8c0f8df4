//! Subjects discovered by scanning a directory tree.

use super::{read_markdown, ContentError, ContentSource, SubjectEntry, TopicEntry};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Each directory under `root` is a subject and each markdown file in it a
/// topic titled by its file stem.
///
/// Topic `file` paths are written relative to `base`, which defaults to
/// `root` itself.
#[derive(Debug, Clone)]
pub struct DirectoryContentSource {
    root: PathBuf,
    base: PathBuf,
}

impl DirectoryContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            base: root.clone(),
            root,
        }
    }

    /// Write topic paths relative to `base` instead of `root`.
    pub fn with_base(root: impl Into<PathBuf>, base: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            base: base.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn scan_subject(&self, dir: &Path) -> Result<Vec<TopicEntry>, ContentError> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|err| ContentError::io(dir, err))?;

        let mut topics = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| ContentError::io(dir, err))?
        {
            let path = entry.path();
            if !is_markdown(&path) {
                continue;
            }
            let Some(title) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            topics.push(TopicEntry {
                title: title.to_string(),
                file: self.relative(&path),
            });
        }

        topics.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(topics)
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.base)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

#[async_trait]
impl ContentSource for DirectoryContentSource {
    async fn list_subjects(&self) -> Result<Vec<SubjectEntry>, ContentError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(root = %self.root.display(), "subjects directory not found");
                return Ok(Vec::new());
            }
            Err(err) => return Err(ContentError::io(&self.root, err)),
        };

        let mut subjects = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| ContentError::io(&self.root, err))?
        {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            let topics = self.scan_subject(&path).await?;
            subjects.push(SubjectEntry {
                name: name.to_string(),
                topics,
            });
        }

        subjects.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!(count = subjects.len(), "scanned subjects");
        Ok(subjects)
    }

    async fn fetch_topic_markdown(&self, file: &str) -> Result<String, ContentError> {
        read_markdown(&self.base, file).await
    }
}

fn is_markdown(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                MARKDOWN_EXTENSIONS
                    .iter()
                    .any(|md| ext.eq_ignore_ascii_case(md))
            })
}
