//! Flashcard commands.

use super::content::fetch_topic;
use super::CommandError;
use crate::state::AppState;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use study_core::{generate_flashcards as build_flashcards, Flashcard, FlashcardSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashcardDeck {
    pub subject: String,
    pub topic: String,
    pub cards: Vec<Flashcard>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashcardReview {
    pub subject: String,
    pub topic: String,
    pub cards_reviewed: usize,
    pub time_taken_seconds: u64,
}

/// Build the flashcard deck for a topic.
pub async fn generate_flashcards(
    state: &AppState,
    subject: &str,
    topic: &str,
) -> Result<FlashcardDeck, CommandError> {
    let loaded = fetch_topic(state, subject, topic).await?;
    let cards = build_flashcards(&loaded.document)?;

    Ok(FlashcardDeck {
        subject: loaded.subject,
        topic: loaded.topic,
        cards,
    })
}

/// Record a finished flashcard session.
pub async fn finish_flashcards(
    state: &AppState,
    review: FlashcardReview,
) -> Result<FlashcardSession, CommandError> {
    let session = state.tracker().record_flashcard_session(
        &review.subject,
        &review.topic,
        review.cards_reviewed,
        review.time_taken_seconds,
        Utc::now(),
    )?;
    Ok(session)
}
