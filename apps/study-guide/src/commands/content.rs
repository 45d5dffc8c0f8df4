//! Content commands.

use super::CommandError;
use crate::content::{find_topic, write_manifest, Manifest, SubjectEntry};
use crate::state::AppState;
use study_core::{parse_document, Document};

/// A parsed topic with its canonical subject and topic names.
pub(crate) struct LoadedTopic {
    pub subject: String,
    pub topic: String,
    pub document: Document,
}

/// List all subjects and their topics.
pub async fn list_subjects(state: &AppState) -> Result<Vec<SubjectEntry>, CommandError> {
    state.content.list_subjects().await.map_err(Into::into)
}

/// Load and parse one topic.
pub async fn load_topic(
    state: &AppState,
    subject: &str,
    topic: &str,
) -> Result<Document, CommandError> {
    Ok(fetch_topic(state, subject, topic).await?.document)
}

/// Rewrite the manifest from the subjects directory.
pub async fn sync_manifest(state: &AppState) -> Result<Manifest, CommandError> {
    let manifest_path = state.config.manifest.as_deref().ok_or_else(|| CommandError {
        message: "no manifest configured; set STUDY_GUIDE_MANIFEST or pass --manifest".to_string(),
    })?;
    write_manifest(&state.config.subjects_dir, manifest_path)
        .await
        .map_err(Into::into)
}

pub(crate) async fn fetch_topic(
    state: &AppState,
    subject: &str,
    topic: &str,
) -> Result<LoadedTopic, CommandError> {
    let subjects = state.content.list_subjects().await?;
    let (subject_entry, topic_entry) = find_topic(&subjects, subject, topic)?;
    let markdown = state
        .content
        .fetch_topic_markdown(&topic_entry.file)
        .await?;

    let document = parse_document(&markdown);
    tracing::debug!(
        file = %topic_entry.file,
        sections = document.sections.len(),
        key_terms = document.key_terms.len(),
        "parsed topic"
    );

    Ok(LoadedTopic {
        subject: subject_entry.name.clone(),
        topic: topic_entry.title.clone(),
        document,
    })
}
