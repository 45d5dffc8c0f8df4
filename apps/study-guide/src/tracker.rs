//! Progress data bound to a store.

use crate::store::{ProgressStore, StoreError};
use chrono::{DateTime, Utc};
use study_core::{Difficulty, FlashcardSession, GeneratedQuestion, ProgressData, QuizRecord};

/// Holds the loaded progress and writes the whole document back to the
/// store after every change.
pub struct ProgressTracker {
    store: Box<dyn ProgressStore>,
    data: ProgressData,
}

impl ProgressTracker {
    pub fn open(store: impl ProgressStore + 'static) -> Self {
        Self::from_boxed(Box::new(store))
    }

    pub fn from_boxed(store: Box<dyn ProgressStore>) -> Self {
        let data = store.load();
        tracing::debug!(
            quizzes = data.quizzes.len(),
            topics = data.topics_studied.len(),
            "loaded progress"
        );
        Self { store, data }
    }

    pub fn data(&self) -> &ProgressData {
        &self.data
    }

    #[allow(clippy::too_many_arguments)]
    pub fn record_quiz(
        &mut self,
        subject: &str,
        topic: &str,
        difficulty: Difficulty,
        questions: &[GeneratedQuestion],
        answers: &[String],
        time_taken_seconds: u64,
        now: DateTime<Utc>,
    ) -> Result<QuizRecord, StoreError> {
        let record = self.data.record_quiz(
            subject,
            topic,
            difficulty,
            questions,
            answers,
            time_taken_seconds,
            now,
        );
        self.store.save(&self.data)?;
        tracing::info!(
            subject,
            topic,
            score = record.score_percentage,
            "recorded quiz"
        );
        Ok(record)
    }

    pub fn record_flashcard_session(
        &mut self,
        subject: &str,
        topic: &str,
        cards_reviewed: usize,
        time_taken_seconds: u64,
        now: DateTime<Utc>,
    ) -> Result<FlashcardSession, StoreError> {
        let session = self.data.record_flashcard_session(
            subject,
            topic,
            cards_reviewed,
            time_taken_seconds,
            now,
        );
        self.store.save(&self.data)?;
        tracing::info!(subject, topic, cards_reviewed, "recorded flashcard session");
        Ok(session)
    }

    /// Swap in imported data. The store is written before memory changes.
    pub fn replace(&mut self, data: ProgressData) -> Result<(), StoreError> {
        self.store.save(&data)?;
        self.data = data;
        tracing::info!(quizzes = self.data.quizzes.len(), "imported progress");
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.replace(ProgressData::default())?;
        tracing::warn!("progress cleared");
        Ok(())
    }
}
