//! Core study guide library shared by every front-end.
//!
//! Provides:
//! - Markdown parser for study notes (title, sections, subsections)
//! - Extraction of key terms, facts, entities, dates and achievements
//! - Rule-based quiz question and flashcard generation
//! - Answer matching for typed quiz answers
//! - Progress records and aggregate statistics

pub mod error;
pub mod extract;
pub mod generator;
pub mod matching;
pub mod parser;
pub mod progress;
pub mod types;

pub use error::{Result, StudyError};
pub use generator::{generate_flashcards, generate_questions};
pub use matching::{is_correct, score_percentage};
pub use parser::{parse_document, parse_sections};
pub use progress::{
    AnswerBreakdown, FlashcardSession, OverallStats, ProgressData, QuizRecord, StrengthsReport,
    TopicStats,
};
pub use types::{
    Difficulty, Document, EmbeddedQuestion, Flashcard, FlashcardType, GeneratedQuestion, KeyTerm,
    QuestionType, Section, Subsection,
};
