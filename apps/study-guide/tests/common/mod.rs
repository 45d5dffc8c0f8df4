//! Common test utilities and fixtures for integration tests.
//!
//! `TestContext` lays out a subjects tree and a data directory in a fresh
//! temp dir and builds an `AppState` over them with a seeded RNG.

#![allow(dead_code)]

pub mod fixtures;

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use study_guide::content::{ContentSource, DirectoryContentSource, ManifestContentSource};
use study_guide::store::JsonFileStore;
use study_guide::{AppState, Config};
use tempfile::TempDir;

pub const QUIZ_COUNT: usize = 5;

pub struct TestContext {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestContext {
    /// Directory-scanned content, progress in `<tmp>/data`.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Content listed through `<tmp>/manifest.json` (not yet written).
    pub fn with_manifest() -> Self {
        Self::build(Some(PathBuf::from("manifest.json")))
    }

    fn build(manifest: Option<PathBuf>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fixtures::write_subjects(&dir.path().join("Subjects"));
        let config = Config {
            subjects_dir: dir.path().join("Subjects"),
            data_dir: dir.path().join("data"),
            manifest: manifest.map(|file| dir.path().join(file)),
            quiz_count: QUIZ_COUNT,
        };
        let state = state_for(config);
        Self { dir, state }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn subjects_dir(&self) -> PathBuf {
        self.state.config.subjects_dir.clone()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.state.config.data_dir.clone()
    }

    /// A second state over the same directories, as after a restart.
    pub fn reopen(&self) -> AppState {
        state_for(self.state.config.clone())
    }
}

fn state_for(config: Config) -> AppState {
    let content: Box<dyn ContentSource> = match &config.manifest {
        Some(manifest) => Box::new(ManifestContentSource::new(manifest, &config.subjects_dir)),
        None => Box::new(DirectoryContentSource::new(&config.subjects_dir)),
    };
    let store = Box::new(JsonFileStore::new(&config.data_dir));
    AppState::with_parts(config, content, store, StdRng::seed_from_u64(42))
}
