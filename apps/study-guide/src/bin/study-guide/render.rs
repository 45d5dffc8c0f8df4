//! Command output rendering.

use crate::OutputFormat;
use study_core::{Document, OverallStats, QuizRecord, TopicStats};
use study_guide::commands::{ProgressStats, TopicProgress};
use study_guide::CommandOutput;

pub fn print(output: &CommandOutput, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(output)?),
        OutputFormat::Plain => print_plain(output),
    }
    Ok(())
}

fn print_plain(output: &CommandOutput) {
    match output {
        CommandOutput::Subjects(subjects) => {
            if subjects.is_empty() {
                println!("No subjects found.");
            }
            for subject in subjects {
                println!("{}", subject.name);
                for topic in &subject.topics {
                    println!("  - {}", topic.title);
                }
            }
        }
        CommandOutput::Topic(document) => print_document(document),
        CommandOutput::Quiz(quiz) => {
            println!("{} / {} ({})", quiz.subject, quiz.topic, quiz.difficulty);
            for (idx, question) in quiz.questions.iter().enumerate() {
                println!("{}. {}", idx + 1, question.question);
            }
        }
        CommandOutput::QuizRecord(record) => print_quiz_record(record),
        CommandOutput::Flashcards(deck) => {
            println!("{} / {}", deck.subject, deck.topic);
            for card in &deck.cards {
                println!("  {} -> {}", card.front, card.back);
            }
        }
        CommandOutput::FlashcardSession(session) => {
            println!(
                "Reviewed {} cards in {}s.",
                session.cards_reviewed, session.time_taken_seconds
            );
        }
        CommandOutput::ProgressStats(stats) => print_stats(stats),
        CommandOutput::TopicProgress(progress) => print_topic_progress(progress),
        CommandOutput::Quizzes(quizzes) => print_quiz_list(quizzes),
        CommandOutput::Exported(json) => println!("{json}"),
        CommandOutput::Imported(overall) => {
            println!("Progress imported.");
            print_overall(overall);
        }
        CommandOutput::Cleared(true) => println!("Progress cleared."),
        CommandOutput::Cleared(false) => println!("Nothing cleared."),
        CommandOutput::Manifest(manifest) => {
            let topics: usize = manifest.subjects.iter().map(|s| s.topics.len()).sum();
            println!(
                "Manifest updated: {} subjects, {} topics.",
                manifest.subjects.len(),
                topics
            );
        }
    }
}

fn print_document(document: &Document) {
    println!("{}", document.title);
    println!("{} words", document.word_count);
    for section in &document.sections {
        println!("## {}", section.title);
        for sub in &section.subsections {
            println!("   ### {}", sub.title);
        }
    }
    if !document.key_terms.is_empty() {
        println!();
        println!("Key terms:");
        for term in &document.key_terms {
            println!("  {}: {}", term.term, term.definition);
        }
    }
    if !document.quiz_questions.is_empty() {
        println!();
        println!("{} review questions", document.quiz_questions.len());
    }
}

fn print_quiz_record(record: &QuizRecord) {
    for (idx, qa) in record.questions_and_answers.iter().enumerate() {
        if qa.was_correct {
            println!("{}. correct", idx + 1);
        } else {
            println!("{}. wrong, expected: {}", idx + 1, qa.correct_answer);
        }
    }
    println!(
        "Score: {}/{} ({}%) in {}s",
        record.correct_answers,
        record.total_questions,
        record.score_percentage,
        record.time_taken_seconds
    );
}

fn print_overall(overall: &OverallStats) {
    println!(
        "Quizzes: {}  Questions: {}  Correct: {}  Average: {}%",
        overall.total_quizzes,
        overall.total_questions_answered,
        overall.total_correct,
        overall.average_score
    );
    println!(
        "Flashcard sessions: {}  Cards reviewed: {}  Study time: {} min",
        overall.total_flashcard_sessions, overall.total_cards_reviewed, overall.study_time_minutes
    );
}

fn print_stats(stats: &ProgressStats) {
    print_overall(&stats.overall);

    let buckets: [(&str, &[TopicStats]); 3] = [
        ("Strengths", &stats.report.strengths),
        ("Needs review", &stats.report.needs_review),
        ("Weaknesses", &stats.report.weaknesses),
    ];
    for (label, topics) in buckets {
        if topics.is_empty() {
            continue;
        }
        println!();
        println!("{label}:");
        for topic in topics {
            println!("  {} / {}: {}%", topic.subject, topic.topic, topic.average_score);
        }
    }

    if !stats.recent_quizzes.is_empty() {
        println!();
        println!("Recent quizzes:");
        print_quiz_list(&stats.recent_quizzes);
    }
}

fn print_topic_progress(progress: &TopicProgress) {
    println!("{} / {}", progress.subject, progress.topic);
    match &progress.stats {
        Some(stats) => println!(
            "Studied {} times, {}/{} correct, average {}%",
            stats.times_studied, stats.total_correct, stats.total_questions, stats.average_score
        ),
        None => println!("Not quizzed yet."),
    }
    print_quiz_list(&progress.history);
}

fn print_quiz_list(quizzes: &[QuizRecord]) {
    if quizzes.is_empty() {
        println!("No quizzes recorded.");
    }
    for quiz in quizzes {
        println!(
            "  {}  {} / {}  {}  {}/{} ({}%)",
            quiz.timestamp.format("%Y-%m-%d %H:%M"),
            quiz.subject,
            quiz.topic,
            quiz.difficulty,
            quiz.correct_answers,
            quiz.total_questions,
            quiz.score_percentage
        );
    }
}
