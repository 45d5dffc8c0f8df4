mod interactive;
mod render;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use study_core::Difficulty;
use study_guide::commands::{self, QuizRequest};
use study_guide::{dispatch, AppState, Command as AppCommand, Config};

#[derive(Parser)]
#[command(
    name = "study-guide",
    about = "Quizzes and flashcards from markdown study notes",
    version
)]
struct Cli {
    /// Directory with one folder per subject
    #[arg(long, global = true)]
    subjects_dir: Option<PathBuf>,

    /// Directory holding progress.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// List subjects from this manifest instead of scanning
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List subjects and their topics
    Subjects,

    /// Show a parsed topic
    Topic { subject: String, topic: String },

    /// Take a quiz, answering on stdin
    Quiz {
        subject: String,
        topic: String,
        /// easy, medium or hard
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,
        /// Number of questions (default from STUDY_GUIDE_QUIZ_COUNT)
        #[arg(long)]
        count: Option<usize>,
        /// Seed for a reproducible question order
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Review flashcards for a topic
    Flashcards { subject: String, topic: String },

    /// Overall stats, recent quizzes, strengths and weaknesses
    Stats,

    /// Quiz history for a topic, or recent quizzes across all topics
    History {
        #[arg(requires = "topic")]
        subject: Option<String>,
        topic: Option<String>,
        /// Maximum quizzes when listing across topics
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Export progress as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Replace progress with an exported file
    Import { file: PathBuf },

    /// Delete all progress
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Rewrite the manifest from the subjects directory
    SyncManifest,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    study_guide::logging::init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(dir) = cli.subjects_dir {
        config.subjects_dir = dir;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(manifest) = cli.manifest {
        config.manifest = Some(manifest);
    }

    let state = AppState::new(config);
    let format = cli.format;

    match cli.command {
        Command::Subjects => run(&state, AppCommand::ListSubjects, format).await?,
        Command::Topic { subject, topic } => {
            run(&state, AppCommand::LoadTopic { subject, topic }, format).await?
        }
        Command::Quiz {
            subject,
            topic,
            difficulty,
            count,
            seed,
        } => {
            let request = QuizRequest {
                subject,
                topic,
                difficulty,
                count,
                seed,
            };
            interactive::quiz(&state, request, format).await?
        }
        Command::Flashcards { subject, topic } => {
            interactive::flashcards(&state, &subject, &topic, format).await?
        }
        Command::Stats => run(&state, AppCommand::GetProgressStats, format).await?,
        Command::History {
            subject: Some(subject),
            topic: Some(topic),
            ..
        } => run(&state, AppCommand::GetTopicProgress { subject, topic }, format).await?,
        Command::History { limit, .. } => {
            run(&state, AppCommand::RecentQuizzes { limit }, format).await?
        }
        Command::Export { output } => {
            let json = commands::export_progress(&state).await?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Exported progress to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            run(&state, AppCommand::ImportProgress { json }, format).await?
        }
        Command::Clear { yes } => {
            let confirmed = yes
                || interactive::confirm(
                    "Are you sure you want to clear all progress? This cannot be undone. [y/N] ",
                )?;
            run(&state, AppCommand::ClearProgress { confirmed }, format).await?
        }
        Command::SyncManifest => run(&state, AppCommand::SyncManifest, format).await?,
    }

    Ok(())
}

async fn run(state: &AppState, command: AppCommand, format: OutputFormat) -> anyhow::Result<()> {
    let output = dispatch(state, command).await?;
    render::print(&output, format)
}
