//! Where topic markdown comes from.

pub mod directory;
pub mod manifest;

pub use directory::DirectoryContentSource;
pub use manifest::{write_manifest, ManifestContentSource};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("topic not found: {subject} / {topic}")]
    TopicNotFound { subject: String, topic: String },
}

impl ContentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A subject and the topics filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectEntry {
    pub name: String,
    pub topics: Vec<TopicEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub title: String,
    /// Path handed back to [`ContentSource::fetch_topic_markdown`].
    pub file: String,
}

/// On-disk manifest: `{"subjects": [{"name", "topics": [{"title", "file"}]}]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub subjects: Vec<SubjectEntry>,
}

#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn list_subjects(&self) -> Result<Vec<SubjectEntry>, ContentError>;
    async fn fetch_topic_markdown(&self, file: &str) -> Result<String, ContentError>;
}

/// Look up a topic by subject name and topic title, ignoring case.
pub fn find_topic<'a>(
    subjects: &'a [SubjectEntry],
    subject: &str,
    topic: &str,
) -> Result<(&'a SubjectEntry, &'a TopicEntry), ContentError> {
    subjects
        .iter()
        .filter(|entry| entry.name.eq_ignore_ascii_case(subject))
        .find_map(|entry| {
            entry
                .topics
                .iter()
                .find(|t| t.title.eq_ignore_ascii_case(topic))
                .map(|t| (entry, t))
        })
        .ok_or_else(|| ContentError::TopicNotFound {
            subject: subject.to_string(),
            topic: topic.to_string(),
        })
}

pub(crate) async fn read_markdown(base: &Path, file: &str) -> Result<String, ContentError> {
    let path = base.join(file);
    tokio::fs::read_to_string(&path).await.map_err(|err| {
        tracing::error!(path = %path.display(), error = %err, "failed to load topic");
        ContentError::io(path, err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects() -> Vec<SubjectEntry> {
        vec![SubjectEntry {
            name: "Social Studies".to_string(),
            topics: vec![TopicEntry {
                title: "Ancient Mesopotamia".to_string(),
                file: "Social Studies/Ancient Mesopotamia.md".to_string(),
            }],
        }]
    }

    #[test]
    fn find_topic_ignores_case() {
        let subjects = subjects();
        let (subject, topic) =
            find_topic(&subjects, "social studies", "ANCIENT MESOPOTAMIA").unwrap();
        assert_eq!(subject.name, "Social Studies");
        assert_eq!(topic.file, "Social Studies/Ancient Mesopotamia.md");
    }

    #[test]
    fn find_topic_reports_missing() {
        let subjects = subjects();
        let err = find_topic(&subjects, "Social Studies", "Rome").unwrap_err();
        assert_eq!(err.to_string(), "topic not found: Social Studies / Rome");
    }
}
