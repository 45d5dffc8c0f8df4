//! Commands exposed to front-ends.
//!
//! Each command is an async function taking the shared [`AppState`].
//! [`dispatch`] routes a serialized [`Command`] to its handler.

pub mod content;
pub mod flashcards;
pub mod progress;
pub mod quiz;

pub use content::{list_subjects, load_topic, sync_manifest};
pub use flashcards::{finish_flashcards, generate_flashcards, FlashcardDeck, FlashcardReview};
pub use progress::{
    clear_progress, export_progress, get_progress_stats, get_topic_progress, import_progress,
    recent_quizzes, ProgressStats, TopicProgress,
};
pub use quiz::{generate_quiz, submit_quiz, Quiz, QuizRequest, QuizSubmission};

use crate::content::{ContentError, Manifest, SubjectEntry};
use crate::state::AppState;
use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use study_core::{Document, FlashcardSession, OverallStats, QuizRecord, StudyError};
use thiserror::Error;

/// User-facing command failure.
#[derive(Debug, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct CommandError {
    pub message: String,
}

impl From<ContentError> for CommandError {
    fn from(e: ContentError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<StoreError> for CommandError {
    fn from(e: StoreError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<StudyError> for CommandError {
    fn from(e: StudyError) -> Self {
        Self { message: e.to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    ListSubjects,
    LoadTopic { subject: String, topic: String },
    GenerateQuiz(QuizRequest),
    SubmitQuiz(QuizSubmission),
    GenerateFlashcards { subject: String, topic: String },
    FinishFlashcards(FlashcardReview),
    GetProgressStats,
    GetTopicProgress { subject: String, topic: String },
    RecentQuizzes { limit: usize },
    ExportProgress,
    ImportProgress { json: String },
    ClearProgress { confirmed: bool },
    SyncManifest,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    Subjects(Vec<SubjectEntry>),
    Topic(Box<Document>),
    Quiz(Quiz),
    QuizRecord(QuizRecord),
    Flashcards(FlashcardDeck),
    FlashcardSession(FlashcardSession),
    ProgressStats(ProgressStats),
    TopicProgress(TopicProgress),
    Quizzes(Vec<QuizRecord>),
    Exported(String),
    Imported(OverallStats),
    Cleared(bool),
    Manifest(Manifest),
}

/// Run one command.
pub async fn dispatch(state: &AppState, command: Command) -> Result<CommandOutput, CommandError> {
    tracing::debug!(?command, "dispatch");
    let output = match command {
        Command::ListSubjects => CommandOutput::Subjects(list_subjects(state).await?),
        Command::LoadTopic { subject, topic } => {
            CommandOutput::Topic(Box::new(load_topic(state, &subject, &topic).await?))
        }
        Command::GenerateQuiz(request) => CommandOutput::Quiz(generate_quiz(state, request).await?),
        Command::SubmitQuiz(submission) => {
            CommandOutput::QuizRecord(submit_quiz(state, submission).await?)
        }
        Command::GenerateFlashcards { subject, topic } => {
            CommandOutput::Flashcards(generate_flashcards(state, &subject, &topic).await?)
        }
        Command::FinishFlashcards(review) => {
            CommandOutput::FlashcardSession(finish_flashcards(state, review).await?)
        }
        Command::GetProgressStats => CommandOutput::ProgressStats(get_progress_stats(state).await?),
        Command::GetTopicProgress { subject, topic } => {
            CommandOutput::TopicProgress(get_topic_progress(state, &subject, &topic).await?)
        }
        Command::RecentQuizzes { limit } => {
            CommandOutput::Quizzes(recent_quizzes(state, limit).await?)
        }
        Command::ExportProgress => CommandOutput::Exported(export_progress(state).await?),
        Command::ImportProgress { json } => {
            CommandOutput::Imported(import_progress(state, &json).await?)
        }
        Command::ClearProgress { confirmed } => {
            CommandOutput::Cleared(clear_progress(state, confirmed).await?)
        }
        Command::SyncManifest => CommandOutput::Manifest(sync_manifest(state).await?),
    };
    Ok(output)
}
