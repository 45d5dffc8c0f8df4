//! Core types for the study guide.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// A study topic parsed from markdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub content: String,
    pub html_content: String,
    pub sections: Vec<Section>,
    pub key_terms: Vec<KeyTerm>,
    pub quiz_questions: Vec<EmbeddedQuestion>,
    pub word_count: usize,
}

/// Level-2 heading block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
    pub subsections: Vec<Subsection>,
    /// Byte range from the heading line to the next level-2 heading.
    pub span: Range<usize>,
}

/// Level-3 heading block inside a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTerm {
    pub term: String,
    pub definition: String,
}

/// Question authored directly in the markdown as `1. Question? **Answer**`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedQuestion {
    pub question: String,
    pub answer: String,
    pub source: String,
}

impl EmbeddedQuestion {
    pub const SOURCE: &'static str = "embedded";

    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            source: Self::SOURCE.to_string(),
        }
    }
}

/// Quiz difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Question types moved to the front of a quiz at this difficulty.
    pub fn priority_types(&self) -> &'static [QuestionType] {
        match self {
            Self::Easy => &[
                QuestionType::Definition,
                QuestionType::Identification,
                QuestionType::Embedded,
            ],
            Self::Medium => &[
                QuestionType::Fact,
                QuestionType::Timeline,
                QuestionType::Significance,
                QuestionType::Embedded,
            ],
            Self::Hard => &[
                QuestionType::FillBlank,
                QuestionType::Significance,
                QuestionType::Fact,
            ],
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Kind of generated question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Definition,
    Fact,
    FillBlank,
    Identification,
    Timeline,
    Significance,
    Embedded,
}

/// A quiz item ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub question: String,
    pub answer: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashcardType {
    TermDefinition,
    Qa,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
    #[serde(rename = "type")]
    pub kind: FlashcardType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_defaults_to_medium() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn question_type_serializes_snake_case() {
        let json = serde_json::to_string(&QuestionType::FillBlank).unwrap();
        assert_eq!(json, "\"fill_blank\"");
    }

    #[test]
    fn generated_question_uses_type_field() {
        let q = GeneratedQuestion {
            question: "What is/are Ziggurat?".to_string(),
            answer: "A stepped temple.".to_string(),
            kind: QuestionType::Definition,
            difficulty: Difficulty::Easy,
            term: Some("Ziggurat".to_string()),
            section: None,
        };
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["type"], "definition");
        assert_eq!(value["difficulty"], "easy");
        assert!(value.get("section").is_none());
    }
}
