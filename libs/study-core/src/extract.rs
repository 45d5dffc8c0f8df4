//! Pattern-based extraction of study material from markdown.
//!
//! Every extractor is total: text without matches yields an empty list.
//! Caps (`MAX_*`) bound how much a single block of text can contribute.

use crate::types::{EmbeddedQuestion, KeyTerm, Section};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

pub const MAX_FACTS: usize = 5;
pub const MAX_ENTITIES: usize = 10;
pub const MAX_DATES: usize = 5;
pub const MAX_ACHIEVEMENTS: usize = 5;

/// Minimum length (exclusive) of a bold-term definition.
const MIN_BOLD_DEFINITION: usize = 10;
/// Minimum length (exclusive) of a bullet fact.
const MIN_BULLET_FACT: usize = 20;
/// Characters kept on each side of a date.
const DATE_CONTEXT: usize = 50;
/// Characters kept on each side of an entity.
pub const ENTITY_CONTEXT: usize = 100;
const MAX_ACHIEVEMENT_DETAIL: usize = 100;

const TERM_SECTION_MARKERS: [&str; 2] = ["KEY TERMS", "VOCABULARY"];
const ENTITY_STOPWORDS: [&str; 5] = ["The", "This", "That", "These", "Those"];
const ACHIEVEMENT_VERBS: [&str; 7] = [
    "created",
    "built",
    "founded",
    "conquered",
    "developed",
    "invented",
    "established",
];

static BOLD_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*[:\s]*([^\n]+)").expect("bold term pattern"));
static EMBEDDED_QUESTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\d+\.\s+(.+?)\s+\*\*(.+?)\*\*").expect("embedded question pattern")
});
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-•]\s*(.+)").expect("bullet pattern"));
static ACHIEVEMENT_FACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(created|built|founded|conquered|developed|invented)\s+([^.!?\n]+)[.!?\n]")
        .expect("achievement fact pattern")
});
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3})\b").expect("entity pattern")
});
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(c\.\s*)?(\d{1,4}(?:\s*-\s*\d{1,4})?)\s*(BCE?|CE?|BC|AD)").expect("date pattern")
});
static ACHIEVEMENTS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    ACHIEVEMENT_VERBS
        .iter()
        .map(|verb| {
            let pattern = format!(r"(?i)(\w+(?:\s+\w+){{0,2}})\s+{verb}\s+([^.!?\n]+)[.!?\n]");
            (*verb, Regex::new(&pattern).expect("achievement pattern"))
        })
        .collect()
});

/// A date with the text around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateMention {
    pub date: String,
    pub context: String,
}

/// "Subject verb detail" clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub subject: String,
    pub action: String,
    pub detail: String,
}

/// Collect key terms from vocabulary sections and inline bold definitions.
///
/// Terms are unique by exact text; the first definition seen wins.
pub fn key_terms(content: &str, sections: &[Section]) -> Vec<KeyTerm> {
    let mut seen = HashSet::new();
    let mut terms = Vec::new();

    let term_sections = sections.iter().filter(|section| {
        let title = section.title.to_uppercase();
        TERM_SECTION_MARKERS.iter().any(|marker| title.contains(marker))
    });

    for section in term_sections {
        for sub in &section.subsections {
            let term: String = sub.title.chars().filter(|c| !matches!(c, '*' | '_')).collect();
            let term = term.trim().to_string();
            if seen.insert(term.clone()) {
                terms.push(KeyTerm {
                    term,
                    definition: sub.content.clone(),
                });
            }
        }
    }

    for caps in BOLD_TERM.captures_iter(content) {
        let term = caps[1].trim().trim_end_matches(':').trim_end();
        let definition = caps[2].trim();
        if definition.chars().count() > MIN_BOLD_DEFINITION && seen.insert(term.to_string()) {
            terms.push(KeyTerm {
                term: term.to_string(),
                definition: definition.to_string(),
            });
        }
    }

    terms
}

/// Numbered list items ending in a bold answer: `1. Question? **Answer**`.
pub fn embedded_questions(content: &str) -> Vec<EmbeddedQuestion> {
    EMBEDDED_QUESTION
        .captures_iter(content)
        .map(|caps| EmbeddedQuestion::new(caps[1].trim(), caps[2].trim()))
        .collect()
}

/// Bullet items and achievement clauses, bullets first.
pub fn facts(text: &str) -> Vec<String> {
    let bullets = BULLET
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|bullet| bullet.chars().count() > MIN_BULLET_FACT);

    let clauses = ACHIEVEMENT_FACT
        .captures_iter(text)
        .map(|caps| format!("{} {}", &caps[1], &caps[2]));

    bullets.chain(clauses).take(MAX_FACTS).collect()
}

/// Runs of one to four capitalized words, in order of first appearance.
pub fn entities(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    ENTITY
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .filter(|entity| entity.chars().count() > 3)
        .filter(|entity| !ENTITY_STOPWORDS.contains(&entity.as_str()))
        .filter(|entity| seen.insert(entity.clone()))
        .take(MAX_ENTITIES)
        .collect()
}

/// Era-marked years such as "c. 2300 BCE" or "490-479 BC".
pub fn dates(text: &str) -> Vec<DateMention> {
    DATE.find_iter(text)
        .take(MAX_DATES)
        .map(|m| DateMention {
            date: m.as_str().to_string(),
            context: char_window(text, m.start(), m.end(), DATE_CONTEXT)
                .trim()
                .to_string(),
        })
        .collect()
}

/// Achievement clauses grouped by verb, in verb order.
pub fn achievements(text: &str) -> Vec<Achievement> {
    ACHIEVEMENTS
        .iter()
        .flat_map(|(verb, pattern)| {
            pattern.captures_iter(text).map(move |caps| Achievement {
                subject: caps[1].trim().to_string(),
                action: verb.to_string(),
                detail: truncate_chars(caps[2].trim(), MAX_ACHIEVEMENT_DETAIL),
            })
        })
        .take(MAX_ACHIEVEMENTS)
        .collect()
}

/// Text around the first occurrence of `entity`, or empty if absent.
pub fn entity_context(entity: &str, text: &str, window: usize) -> String {
    match text.find(entity) {
        Some(start) => char_window(text, start, start + entity.len(), window)
            .trim()
            .to_string(),
        None => String::new(),
    }
}

/// First `max` characters of `s`.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Slice of `text` extending `window` characters either side of `start..end`.
fn char_window(text: &str, start: usize, end: usize, window: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(window)
        .last()
        .map_or(start, |(idx, _)| idx);
    let to = text[end..]
        .char_indices()
        .nth(window)
        .map_or(text.len(), |(idx, _)| end + idx);
    &text[from..to]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sections;
    use pretty_assertions::assert_eq;

    #[test]
    fn key_terms_from_vocabulary_section() {
        let doc = "# T\n## Vocabulary\n### **Cuneiform**\nWedge-shaped writing.\n### _Stele_\nCarved stone slab.\n";
        let sections = parse_sections(doc);
        let terms = key_terms(doc, &sections);
        assert_eq!(
            terms,
            vec![
                KeyTerm {
                    term: "Cuneiform".to_string(),
                    definition: "Wedge-shaped writing.".to_string(),
                },
                KeyTerm {
                    term: "Stele".to_string(),
                    definition: "Carved stone slab.".to_string(),
                },
            ]
        );
    }

    #[test]
    fn key_terms_ignore_other_sections() {
        let doc = "## Geography\n### Tigris\nA river.\n";
        let sections = parse_sections(doc);
        assert!(key_terms(doc, &sections).is_empty());
    }

    #[test]
    fn bold_terms_need_meaningful_definition() {
        let doc = "**Sumer:** The earliest known civilization in the region.\n**Ur:** A city.\n";
        let terms = key_terms(doc, &[]);
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].term, "Sumer");
        assert_eq!(
            terms[0].definition,
            "The earliest known civilization in the region."
        );
    }

    #[test]
    fn key_terms_are_unique() {
        let doc = "**Sumer:** Another long definition of Sumer here.\n**Akkad:** An empire founded by Sargon.\n**Akkad:** A different definition of Akkad.\n## KEY TERMS\n### Sumer\nFirst civilization.\n";
        let sections = parse_sections(doc);
        let terms = key_terms(doc, &sections);
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].term, "Sumer");
        assert_eq!(terms[0].definition, "First civilization.");
        assert_eq!(terms[1].term, "Akkad");
        assert_eq!(terms[1].definition, "An empire founded by Sargon.");

        let unique: HashSet<_> = terms.iter().map(|t| &t.term).collect();
        assert_eq!(unique.len(), terms.len());
    }

    #[test]
    fn embedded_questions_from_numbered_list() {
        let doc = "## Quiz\n1. Who wrote the law code? **Hammurabi**\n2. What river is east? **Tigris**\n3. No answer here\n";
        let questions = embedded_questions(doc);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "Who wrote the law code?");
        assert_eq!(questions[0].answer, "Hammurabi");
        assert_eq!(questions[0].source, "embedded");
        assert_eq!(questions[1].answer, "Tigris");
    }

    #[test]
    fn facts_from_bullets_and_achievements() {
        let text = "- Farming villages appeared along the rivers\n- Short one\nSargon conquered the Sumerian cities. They invented writing!";
        let facts = facts(text);
        assert_eq!(
            facts,
            vec![
                "Farming villages appeared along the rivers".to_string(),
                "conquered the Sumerian cities".to_string(),
                "invented writing".to_string(),
            ]
        );
    }

    #[test]
    fn facts_are_capped() {
        let text = (0..8)
            .map(|i| format!("- Bullet number {i} with plenty of words"))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(facts(&text).len(), MAX_FACTS);
    }

    #[test]
    fn entities_skip_stopwords_and_duplicates() {
        let text = "The Babylonians lived near Babylon. This city was ruled by Hammurabi. Babylon grew.";
        let found = entities(text);
        assert_eq!(
            found,
            vec![
                "The Babylonians".to_string(),
                "Babylon".to_string(),
                "Hammurabi".to_string(),
            ]
        );
    }

    #[test]
    fn entities_join_capitalized_runs() {
        let found = entities("ruled by Sargon Of Akkad for years");
        assert_eq!(found, vec!["Sargon Of Akkad".to_string()]);
    }

    #[test]
    fn entities_are_capped() {
        let text = "Alpha, Bravo, Charlie, Delta, Echo, Foxtrot, Golf, Hotel, India, Juliet, Kilo, Lima.";
        assert_eq!(entities(text).len(), MAX_ENTITIES);
    }

    #[test]
    fn dates_with_context() {
        let text = "Hammurabi ruled from 1792 BCE and his code was carved c. 1754 BC on a stele.";
        let found = dates(text);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].date, "1792 BCE");
        assert_eq!(found[1].date, "c. 1754 BC");
        assert!(found[0].context.contains("Hammurabi ruled from 1792 BCE"));
    }

    #[test]
    fn date_ranges_are_matched() {
        let found = dates("The wars lasted 490-479 BC in Greece.");
        assert_eq!(found[0].date, "490-479 BC");
    }

    #[test]
    fn date_context_is_bounded() {
        let filler = "x".repeat(80);
        let text = format!("{filler} 500 AD {filler}");
        let found = dates(&text);
        assert_eq!(found[0].context.chars().count(), "500 AD".len() + 2 * DATE_CONTEXT);
    }

    #[test]
    fn achievements_capture_subject_and_detail() {
        let text = "King Sargon conquered the city of Ur. The Sumerians invented the wheel.";
        let found = achievements(text);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].subject, "King Sargon");
        assert_eq!(found[0].action, "conquered");
        assert_eq!(found[0].detail, "the city of Ur");
        assert_eq!(found[1].subject, "The Sumerians");
        assert_eq!(found[1].action, "invented");
    }

    #[test]
    fn achievement_detail_is_truncated() {
        let detail = "a".repeat(150);
        let text = format!("Hammurabi established {detail}.");
        let found = achievements(&text);
        assert_eq!(found[0].detail.len(), MAX_ACHIEVEMENT_DETAIL);
    }

    #[test]
    fn entity_context_window() {
        let text = "Long ago Hammurabi ruled Babylon.";
        assert_eq!(entity_context("Hammurabi", text, 4), "ago Hammurabi rul");
        assert_eq!(entity_context("Sargon", text, 4), "");
    }

    #[test]
    fn char_window_respects_multibyte_text() {
        let text = "ééé 100 BC ééé";
        let found = dates(text);
        assert_eq!(found[0].context, text);
    }

    #[test]
    fn no_matches_yield_empty_collections() {
        let text = "lowercase words only, nothing to see.";
        assert!(facts(text).is_empty());
        assert!(entities(text).is_empty());
        assert!(dates(text).is_empty());
        assert!(achievements(text).is_empty());
        assert!(embedded_questions(text).is_empty());
        assert!(key_terms(text, &[]).is_empty());
    }
}
