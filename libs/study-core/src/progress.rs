//! Quiz and flashcard progress.
//!
//! `ProgressData` is the whole persisted document. It is plain data plus the
//! recording and query operations; where it is stored is up to the caller.
//! Keys are written in camelCase and snake_case keys are accepted on input,
//! so files written by either front-end variant load.

use crate::error::{Result, StudyError};
use crate::matching::{is_correct, round2, score_percentage};
use crate::types::{Difficulty, GeneratedQuestion};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const STRENGTH_THRESHOLD: f64 = 80.0;
pub const WEAKNESS_THRESHOLD: f64 = 60.0;
pub const MAX_REPORT_ENTRIES: usize = 5;

/// Top-level keys an imported file must carry.
const REQUIRED_KEYS: [(&str, &str); 2] = [("quizzes", "quizzes"), ("overallStats", "overall_stats")];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressData {
    #[serde(default)]
    pub quizzes: Vec<QuizRecord>,
    #[serde(default, alias = "flashcard_sessions")]
    pub flashcard_sessions: Vec<FlashcardSession>,
    /// Keyed by `"{subject}_{topic}"`.
    #[serde(default, alias = "topics_studied")]
    pub topics_studied: BTreeMap<String, TopicStats>,
    #[serde(alias = "overall_stats")]
    pub overall_stats: OverallStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    #[serde(alias = "total_questions")]
    pub total_questions: usize,
    #[serde(alias = "correct_answers")]
    pub correct_answers: usize,
    #[serde(alias = "score_percentage")]
    pub score_percentage: f64,
    #[serde(alias = "time_taken_seconds")]
    pub time_taken_seconds: u64,
    #[serde(default, alias = "questions_and_answers")]
    pub questions_and_answers: Vec<AnswerBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerBreakdown {
    pub question: String,
    #[serde(alias = "user_answer")]
    pub user_answer: String,
    #[serde(alias = "correct_answer")]
    pub correct_answer: String,
    #[serde(alias = "was_correct")]
    pub was_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardSession {
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub subject: String,
    pub topic: String,
    #[serde(alias = "cards_reviewed")]
    pub cards_reviewed: usize,
    #[serde(alias = "time_taken_seconds")]
    pub time_taken_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicStats {
    pub subject: String,
    pub topic: String,
    #[serde(alias = "times_studied")]
    pub times_studied: u32,
    #[serde(alias = "total_questions")]
    pub total_questions: usize,
    #[serde(alias = "total_correct")]
    pub total_correct: usize,
    #[serde(alias = "average_score")]
    pub average_score: f64,
    #[serde(default, alias = "last_studied", with = "timestamp::option")]
    pub last_studied: Option<DateTime<Utc>>,
}

impl TopicStats {
    fn new(subject: &str, topic: &str) -> Self {
        Self {
            subject: subject.to_string(),
            topic: topic.to_string(),
            times_studied: 0,
            total_questions: 0,
            total_correct: 0,
            average_score: 0.0,
            last_studied: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    #[serde(alias = "total_quizzes")]
    pub total_quizzes: u32,
    #[serde(alias = "total_questions_answered")]
    pub total_questions_answered: usize,
    #[serde(alias = "total_correct")]
    pub total_correct: usize,
    #[serde(alias = "average_score")]
    pub average_score: f64,
    #[serde(alias = "study_time_minutes")]
    pub study_time_minutes: f64,
    #[serde(default, alias = "total_flashcard_sessions")]
    pub total_flashcard_sessions: u32,
    #[serde(default, alias = "total_cards_reviewed")]
    pub total_cards_reviewed: usize,
}

/// Topics bucketed by average score, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthsReport {
    pub strengths: Vec<TopicStats>,
    pub weaknesses: Vec<TopicStats>,
    pub needs_review: Vec<TopicStats>,
}

impl ProgressData {
    pub fn topic_key(subject: &str, topic: &str) -> String {
        format!("{subject}_{topic}")
    }

    /// Key of the `topics_studied` entry for this pair. Names containing `_`
    /// can share a plain key, so later pairs get a `#n` suffix.
    fn stats_key(&self, subject: &str, topic: &str) -> String {
        let base = Self::topic_key(subject, topic);
        let mut key = base.clone();
        let mut n = 1;
        while let Some(stats) = self.topics_studied.get(&key) {
            if stats.subject == subject && stats.topic == topic {
                break;
            }
            n += 1;
            key = format!("{base}#{n}");
        }
        key
    }

    /// Score a finished quiz, append it to the history and fold it into the
    /// topic and overall aggregates.
    ///
    /// Answer `i` belongs to question `i`; questions without an answer count
    /// as wrong.
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
    ) -> QuizRecord {
        let questions_and_answers: Vec<AnswerBreakdown> = questions
            .iter()
            .enumerate()
            .map(|(idx, question)| {
                let user_answer = answers.get(idx);
                AnswerBreakdown {
                    question: question.question.clone(),
                    user_answer: user_answer.cloned().unwrap_or_default(),
                    correct_answer: question.answer.clone(),
                    was_correct: user_answer
                        .is_some_and(|answer| is_correct(answer, &question.answer)),
                }
            })
            .collect();

        let total_questions = questions.len();
        let correct_answers = questions_and_answers
            .iter()
            .filter(|qa| qa.was_correct)
            .count();

        let record = QuizRecord {
            timestamp: now,
            subject: subject.to_string(),
            topic: topic.to_string(),
            difficulty,
            total_questions,
            correct_answers,
            score_percentage: score_percentage(correct_answers, total_questions),
            time_taken_seconds,
            questions_and_answers,
        };
        self.quizzes.push(record.clone());

        let key = self.stats_key(subject, topic);
        let stats = self
            .topics_studied
            .entry(key)
            .or_insert_with(|| TopicStats::new(subject, topic));
        stats.times_studied += 1;
        stats.total_questions += total_questions;
        stats.total_correct += correct_answers;
        stats.average_score = score_percentage(stats.total_correct, stats.total_questions);
        stats.last_studied = Some(now);

        let overall = &mut self.overall_stats;
        overall.total_quizzes += 1;
        overall.total_questions_answered += total_questions;
        overall.total_correct += correct_answers;
        overall.average_score =
            score_percentage(overall.total_correct, overall.total_questions_answered);
        overall.add_study_time(time_taken_seconds);

        record
    }

    /// Append a flashcard session. Sessions add study time but are not scored.
    pub fn record_flashcard_session(
        &mut self,
        subject: &str,
        topic: &str,
        cards_reviewed: usize,
        time_taken_seconds: u64,
        now: DateTime<Utc>,
    ) -> FlashcardSession {
        let session = FlashcardSession {
            timestamp: now,
            subject: subject.to_string(),
            topic: topic.to_string(),
            cards_reviewed,
            time_taken_seconds,
        };
        self.flashcard_sessions.push(session.clone());

        let overall = &mut self.overall_stats;
        overall.total_flashcard_sessions += 1;
        overall.total_cards_reviewed += cards_reviewed;
        overall.add_study_time(time_taken_seconds);

        session
    }

    pub fn overall_stats(&self) -> &OverallStats {
        &self.overall_stats
    }

    pub fn topic_stats(&self, subject: &str, topic: &str) -> Option<&TopicStats> {
        self.topics_studied.get(&self.stats_key(subject, topic))
    }

    /// Newest first.
    pub fn recent_quizzes(&self, limit: usize) -> Vec<&QuizRecord> {
        let mut quizzes: Vec<&QuizRecord> = self.quizzes.iter().collect();
        quizzes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        quizzes.truncate(limit);
        quizzes
    }

    /// Every quiz taken on one topic, in recording order.
    pub fn quiz_history(&self, subject: &str, topic: &str) -> Vec<&QuizRecord> {
        self.quizzes
            .iter()
            .filter(|quiz| quiz.subject == subject && quiz.topic == topic)
            .collect()
    }

    /// Quizzes from the last `days` days, oldest first, optionally narrowed
    /// to a subject and/or topic.
    pub fn performance_trend(
        &self,
        subject: Option<&str>,
        topic: Option<&str>,
        days: i64,
        now: DateTime<Utc>,
    ) -> Vec<&QuizRecord> {
        let cutoff = now - Duration::days(days);
        let mut quizzes: Vec<&QuizRecord> = self
            .quizzes
            .iter()
            .filter(|quiz| quiz.timestamp >= cutoff)
            .filter(|quiz| subject.is_none_or(|s| quiz.subject == s))
            .filter(|quiz| topic.is_none_or(|t| quiz.topic == t))
            .collect();
        quizzes.sort_by_key(|quiz| quiz.timestamp);
        quizzes
    }

    pub fn strengths_and_weaknesses(&self) -> StrengthsReport {
        let mut sorted: Vec<&TopicStats> = self.topics_studied.values().collect();
        sorted.sort_by(|a, b| b.average_score.total_cmp(&a.average_score));

        let bucket = |keep: &dyn Fn(f64) -> bool| -> Vec<TopicStats> {
            sorted
                .iter()
                .filter(|stats| keep(stats.average_score))
                .take(MAX_REPORT_ENTRIES)
                .map(|stats| (*stats).clone())
                .collect()
        };

        StrengthsReport {
            strengths: bucket(&|score: f64| score >= STRENGTH_THRESHOLD),
            weaknesses: bucket(&|score: f64| score < WEAKNESS_THRESHOLD),
            needs_review: bucket(&|score: f64| {
                (WEAKNESS_THRESHOLD..STRENGTH_THRESHOLD).contains(&score)
            }),
        }
    }

    /// Reset to the zero state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse an exported progress file. Only the top-level shape is checked
    /// before deserializing.
    pub fn import_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let object = value
            .as_object()
            .ok_or_else(|| StudyError::InvalidProgress("expected a JSON object".to_string()))?;

        for (camel, snake) in REQUIRED_KEYS {
            let present = [camel, snake]
                .iter()
                .any(|key| object.get(*key).is_some_and(|v| !v.is_null()));
            if !present {
                return Err(StudyError::InvalidProgress(format!("missing `{camel}`")));
            }
        }

        serde_json::from_value(value)
            .map_err(|err| StudyError::InvalidProgress(err.to_string()))
    }
}

impl OverallStats {
    fn add_study_time(&mut self, seconds: u64) {
        self.study_time_minutes = round2(self.study_time_minutes + round2(seconds as f64 / 60.0));
    }
}

/// RFC 3339 timestamps. Timestamps without an offset are read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Ok(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|err| format!("invalid timestamp {raw:?}: {err}"))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de::Error, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| super::parse(&raw).map_err(D::Error::custom))
                .transpose()
        }
    }
}
