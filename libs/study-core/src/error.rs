//! Error types for study-core.

use thiserror::Error;

/// Result type alias using StudyError.
pub type Result<T> = std::result::Result<T, StudyError>;

/// Errors surfaced by generation and progress import.
///
/// Parsing and extraction never fail; malformed markdown only yields fewer
/// extracted items.
#[derive(Debug, Error)]
pub enum StudyError {
    #[error("no questions could be generated for this topic")]
    NoQuestions,

    #[error("no flashcards could be generated for this topic")]
    NoFlashcards,

    #[error("invalid progress file: {0}")]
    InvalidProgress(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
