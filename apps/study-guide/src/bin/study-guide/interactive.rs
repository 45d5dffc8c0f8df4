//! Interactive quiz and flashcard sessions on stdin.

use crate::render;
use crate::OutputFormat;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use study_guide::commands::{self, FlashcardReview, QuizRequest, QuizSubmission};
use study_guide::{AppState, CommandOutput};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Prompts go to stdout in plain mode and to stderr in JSON mode so stdout
/// carries only the result document.
fn prompt_writer(format: OutputFormat) -> Box<dyn Write> {
    match format {
        OutputFormat::Plain => Box::new(io::stdout()),
        OutputFormat::Json => Box::new(io::stderr()),
    }
}

pub async fn quiz(
    state: &AppState,
    request: QuizRequest,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let quiz = commands::generate_quiz(state, request).await?;
    let mut out = prompt_writer(format);
    writeln!(
        out,
        "{} / {}: {} questions ({})",
        quiz.subject,
        quiz.topic,
        quiz.questions.len(),
        quiz.difficulty
    )?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let started = Instant::now();
    let mut answers = Vec::with_capacity(quiz.questions.len());
    for (idx, question) in quiz.questions.iter().enumerate() {
        write!(out, "\n{}. {}\n> ", idx + 1, question.question)?;
        out.flush()?;
        match lines.next_line().await? {
            Some(line) => answers.push(line),
            None => break,
        }
    }

    let record = commands::submit_quiz(
        state,
        QuizSubmission {
            subject: quiz.subject,
            topic: quiz.topic,
            difficulty: quiz.difficulty,
            questions: quiz.questions,
            answers,
            time_taken_seconds: started.elapsed().as_secs(),
        },
    )
    .await?;

    writeln!(out)?;
    render::print(&CommandOutput::QuizRecord(record), format)
}

pub async fn flashcards(
    state: &AppState,
    subject: &str,
    topic: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let deck = commands::generate_flashcards(state, subject, topic).await?;
    let mut out = prompt_writer(format);
    writeln!(
        out,
        "{} / {}: {} cards. Enter reveals and advances, q quits.",
        deck.subject,
        deck.topic,
        deck.cards.len()
    )?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let started = Instant::now();
    let mut reviewed = 0;
    for (idx, card) in deck.cards.iter().enumerate() {
        write!(out, "\n[{}/{}] {}\n", idx + 1, deck.cards.len(), card.front)?;
        out.flush()?;
        if !wants_more(lines.next_line().await?) {
            break;
        }
        writeln!(out, "  -> {}", card.back)?;
        reviewed += 1;
        out.flush()?;
        if !wants_more(lines.next_line().await?) {
            break;
        }
    }

    let session = commands::finish_flashcards(
        state,
        FlashcardReview {
            subject: deck.subject,
            topic: deck.topic,
            cards_reviewed: reviewed,
            time_taken_seconds: started.elapsed().as_secs(),
        },
    )
    .await?;

    writeln!(out)?;
    render::print(&CommandOutput::FlashcardSession(session), format)
}

/// Ask a yes/no question on stderr.
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    eprint!("{prompt}");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

fn wants_more(line: Option<String>) -> bool {
    line.is_some_and(|l| !l.trim().eq_ignore_ascii_case("q"))
}
