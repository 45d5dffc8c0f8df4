//! Quiz commands.

use super::content::fetch_topic;
use super::CommandError;
use crate::state::AppState;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use study_core::{generate_questions, Difficulty, GeneratedQuestion, QuizRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRequest {
    pub subject: String,
    pub topic: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Defaults to the configured quiz size.
    #[serde(default)]
    pub count: Option<usize>,
    /// Fixed seed for a reproducible quiz.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub questions: Vec<GeneratedQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSubmission {
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub questions: Vec<GeneratedQuestion>,
    pub answers: Vec<String>,
    pub time_taken_seconds: u64,
}

/// Generate questions for a topic.
pub async fn generate_quiz(state: &AppState, request: QuizRequest) -> Result<Quiz, CommandError> {
    let loaded = fetch_topic(state, &request.subject, &request.topic).await?;
    let count = request.count.unwrap_or(state.config.quiz_count);

    let questions = match request.seed {
        Some(seed) => generate_questions(
            &loaded.document,
            request.difficulty,
            count,
            &mut StdRng::seed_from_u64(seed),
        )?,
        None => generate_questions(
            &loaded.document,
            request.difficulty,
            count,
            &mut *state.rng(),
        )?,
    };

    tracing::info!(
        subject = %loaded.subject,
        topic = %loaded.topic,
        difficulty = %request.difficulty,
        count = questions.len(),
        "generated quiz"
    );

    Ok(Quiz {
        subject: loaded.subject,
        topic: loaded.topic,
        difficulty: request.difficulty,
        questions,
    })
}

/// Score answers and record the quiz.
pub async fn submit_quiz(
    state: &AppState,
    submission: QuizSubmission,
) -> Result<QuizRecord, CommandError> {
    let record = state.tracker().record_quiz(
        &submission.subject,
        &submission.topic,
        submission.difficulty,
        &submission.questions,
        &submission.answers,
        submission.time_taken_seconds,
        Utc::now(),
    )?;
    Ok(record)
}
