//! Rule-based quiz question and flashcard generation.
//!
//! Questions come from three places: questions embedded in the markdown,
//! key terms, and patterns found in each section. The pool is shuffled with
//! the caller's random source, then the question types favoured by the
//! requested difficulty are moved to the front.

use crate::error::{Result, StudyError};
use crate::extract::{self, ENTITY_CONTEXT};
use crate::types::{
    Difficulty, Document, EmbeddedQuestion, Flashcard, FlashcardType, GeneratedQuestion, KeyTerm,
    QuestionType, Section,
};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

/// Replaces the hidden word in fill-in-the-blank questions.
pub const BLANK: &str = "______";

const MAX_DEFINITION_ANSWER: usize = 200;
const FACTS_PER_TERM: usize = 2;
const ENTITIES_PER_SECTION: usize = 3;
const DATES_PER_SECTION: usize = 2;
const ACHIEVEMENTS_PER_SECTION: usize = 2;
const MAX_QA_FLASHCARDS: usize = 10;
/// A sentence needs more words than this to be blanked.
const MIN_BLANK_SENTENCE_WORDS: usize = 5;
/// Words longer than this are worth blanking.
const MIN_BLANK_WORD_LEN: usize = 5;

/// Generate up to `count` quiz questions for a document.
///
/// Fails with [`StudyError::NoQuestions`] only when the document yields no
/// candidates at all; asking for more than are available returns them all.
pub fn generate_questions<R: Rng + ?Sized>(
    document: &Document,
    difficulty: Difficulty,
    count: usize,
    rng: &mut R,
) -> Result<Vec<GeneratedQuestion>> {
    let mut pool = from_embedded(&document.quiz_questions);
    pool.extend(from_key_terms(&document.key_terms, difficulty, rng));
    pool.extend(from_sections(&document.sections));

    if pool.is_empty() {
        return Err(StudyError::NoQuestions);
    }

    pool.shuffle(rng);
    let mut questions = prioritize(pool, difficulty);
    questions.truncate(count);
    Ok(questions)
}

/// One card per key term, then up to ten from embedded questions.
pub fn generate_flashcards(document: &Document) -> Result<Vec<Flashcard>> {
    let term_cards = document.key_terms.iter().map(|kt| Flashcard {
        front: kt.term.clone(),
        back: kt.definition.clone(),
        kind: FlashcardType::TermDefinition,
    });
    let qa_cards = document
        .quiz_questions
        .iter()
        .take(MAX_QA_FLASHCARDS)
        .map(|q| Flashcard {
            front: q.question.clone(),
            back: q.answer.clone(),
            kind: FlashcardType::Qa,
        });

    let cards: Vec<Flashcard> = term_cards.chain(qa_cards).collect();
    if cards.is_empty() {
        return Err(StudyError::NoFlashcards);
    }
    Ok(cards)
}

/// Stable partition: priority types first, everything else after, each half
/// keeping its incoming order.
pub fn prioritize(
    questions: Vec<GeneratedQuestion>,
    difficulty: Difficulty,
) -> Vec<GeneratedQuestion> {
    let priority = difficulty.priority_types();
    let (mut front, back): (Vec<_>, Vec<_>) = questions
        .into_iter()
        .partition(|q| priority.contains(&q.kind));
    front.extend(back);
    front
}

fn from_embedded(embedded: &[EmbeddedQuestion]) -> Vec<GeneratedQuestion> {
    embedded
        .iter()
        .map(|q| GeneratedQuestion {
            question: q.question.clone(),
            answer: q.answer.clone(),
            kind: QuestionType::Embedded,
            difficulty: Difficulty::Medium,
            term: None,
            section: None,
        })
        .collect()
}

fn from_key_terms<R: Rng + ?Sized>(
    key_terms: &[KeyTerm],
    difficulty: Difficulty,
    rng: &mut R,
) -> Vec<GeneratedQuestion> {
    let mut questions = Vec::new();

    for KeyTerm { term, definition } in key_terms {
        questions.push(GeneratedQuestion {
            question: format!("What is/are {term}?"),
            answer: extract::truncate_chars(definition, MAX_DEFINITION_ANSWER),
            kind: QuestionType::Definition,
            difficulty: Difficulty::Easy,
            term: Some(term.clone()),
            section: None,
        });

        if difficulty != Difficulty::Easy {
            for fact in extract::facts(definition).into_iter().take(FACTS_PER_TERM) {
                questions.push(GeneratedQuestion {
                    question: format!("What did {term} accomplish or create?"),
                    answer: fact,
                    kind: QuestionType::Fact,
                    difficulty: Difficulty::Medium,
                    term: Some(term.clone()),
                    section: None,
                });
            }
        }

        if difficulty == Difficulty::Hard {
            if let Some(question) = fill_blank(term, definition, rng) {
                questions.push(question);
            }
        }
    }

    questions
}

fn from_sections(sections: &[Section]) -> Vec<GeneratedQuestion> {
    let mut questions = Vec::new();

    for section in sections {
        let content = section.content.as_str();
        let provenance = Some(section.title.clone());

        for entity in extract::entities(content)
            .into_iter()
            .take(ENTITIES_PER_SECTION)
        {
            questions.push(GeneratedQuestion {
                question: format!("Who or what was {entity}?"),
                answer: extract::entity_context(&entity, content, ENTITY_CONTEXT),
                kind: QuestionType::Identification,
                difficulty: Difficulty::Easy,
                term: None,
                section: provenance.clone(),
            });
        }

        for mention in extract::dates(content).into_iter().take(DATES_PER_SECTION) {
            questions.push(GeneratedQuestion {
                question: format!("What happened in {}?", mention.date),
                answer: mention.context,
                kind: QuestionType::Timeline,
                difficulty: Difficulty::Medium,
                term: None,
                section: provenance.clone(),
            });
        }

        for achievement in extract::achievements(content)
            .into_iter()
            .take(ACHIEVEMENTS_PER_SECTION)
        {
            questions.push(GeneratedQuestion {
                question: format!("What was significant about {}?", achievement.subject),
                answer: achievement.detail,
                kind: QuestionType::Significance,
                difficulty: Difficulty::Medium,
                term: None,
                section: provenance.clone(),
            });
        }
    }

    questions
}

/// Blank out one notable word of the first sentence long enough to quiz on.
fn fill_blank<R: Rng + ?Sized>(
    term: &str,
    definition: &str,
    rng: &mut R,
) -> Option<GeneratedQuestion> {
    for sentence in definition.split(['.', '!', '?']) {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        if words.len() <= MIN_BLANK_SENTENCE_WORDS {
            continue;
        }

        let candidates: Vec<&str> = words
            .into_iter()
            .filter(|w| {
                w.chars().count() > MIN_BLANK_WORD_LEN
                    || w.chars().next().is_some_and(char::is_uppercase)
            })
            .collect();

        let Some(word) = candidates.choose(rng) else {
            continue;
        };

        return Some(GeneratedQuestion {
            question: format!(
                "Fill in the blank: {}",
                sentence.trim().replacen(word, BLANK, 1)
            ),
            answer: word
                .chars()
                .filter(|c| !matches!(c, '.' | ',' | '!' | '?'))
                .collect(),
            kind: QuestionType::FillBlank,
            difficulty: Difficulty::Hard,
            term: Some(term.to_string()),
            section: None,
        });
    }

    None
}
