//! Progress commands.

use super::CommandError;
use crate::state::AppState;
use chrono::Utc;
use serde::Serialize;
use study_core::{OverallStats, ProgressData, QuizRecord, StrengthsReport, TopicStats};

pub const RECENT_QUIZ_LIMIT: usize = 10;
pub const TREND_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize)]
pub struct ProgressStats {
    pub overall: OverallStats,
    pub recent_quizzes: Vec<QuizRecord>,
    pub report: StrengthsReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicProgress {
    pub subject: String,
    pub topic: String,
    /// `None` until the topic has been quizzed.
    pub stats: Option<TopicStats>,
    pub history: Vec<QuizRecord>,
    /// Quizzes from the last 30 days, oldest first.
    pub trend: Vec<QuizRecord>,
}

/// Overall stats, recent quizzes and the strengths report.
pub async fn get_progress_stats(state: &AppState) -> Result<ProgressStats, CommandError> {
    let tracker = state.tracker();
    let data = tracker.data();
    Ok(ProgressStats {
        overall: data.overall_stats().clone(),
        recent_quizzes: data
            .recent_quizzes(RECENT_QUIZ_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
        report: data.strengths_and_weaknesses(),
    })
}

/// Stats and history for one topic.
pub async fn get_topic_progress(
    state: &AppState,
    subject: &str,
    topic: &str,
) -> Result<TopicProgress, CommandError> {
    let tracker = state.tracker();
    let data = tracker.data();
    Ok(TopicProgress {
        subject: subject.to_string(),
        topic: topic.to_string(),
        stats: data.topic_stats(subject, topic).cloned(),
        history: data.quiz_history(subject, topic).into_iter().cloned().collect(),
        trend: data
            .performance_trend(Some(subject), Some(topic), TREND_DAYS, Utc::now())
            .into_iter()
            .cloned()
            .collect(),
    })
}

/// Most recent quizzes across all topics, newest first.
pub async fn recent_quizzes(
    state: &AppState,
    limit: usize,
) -> Result<Vec<QuizRecord>, CommandError> {
    let tracker = state.tracker();
    Ok(tracker
        .data()
        .recent_quizzes(limit)
        .into_iter()
        .cloned()
        .collect())
}

/// Progress as pretty-printed JSON.
pub async fn export_progress(state: &AppState) -> Result<String, CommandError> {
    Ok(state.tracker().data().export_json()?)
}

/// Replace all progress with an exported file. Invalid files leave the
/// current progress untouched.
pub async fn import_progress(state: &AppState, json: &str) -> Result<OverallStats, CommandError> {
    let data = ProgressData::import_json(json).map_err(|err| {
        tracing::warn!(error = %err, "rejected progress import");
        CommandError::from(err)
    })?;
    let mut tracker = state.tracker();
    tracker.replace(data)?;
    Ok(tracker.data().overall_stats().clone())
}

/// Reset all progress. Does nothing unless `confirmed`; returns whether
/// anything was cleared.
pub async fn clear_progress(state: &AppState, confirmed: bool) -> Result<bool, CommandError> {
    if !confirmed {
        return Ok(false);
    }
    state.tracker().clear()?;
    Ok(true)
}
