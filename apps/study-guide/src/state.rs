//! Application state.

use crate::config::Config;
use crate::content::{ContentSource, DirectoryContentSource, ManifestContentSource};
use crate::store::{JsonFileStore, ProgressStore};
use crate::tracker::ProgressTracker;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Mutex, MutexGuard};

/// Everything a command needs.
pub struct AppState {
    pub config: Config,
    pub content: Box<dyn ContentSource>,
    pub tracker: Mutex<ProgressTracker>,
    pub rng: Mutex<StdRng>,
}

impl AppState {
    /// Content from the manifest when one is configured, otherwise from the
    /// subjects directory; progress in `progress.json` under the data dir.
    pub fn new(config: Config) -> Self {
        let content: Box<dyn ContentSource> = match &config.manifest {
            Some(manifest) => Box::new(ManifestContentSource::new(
                manifest,
                &config.subjects_dir,
            )),
            None => Box::new(DirectoryContentSource::new(&config.subjects_dir)),
        };
        let store = Box::new(JsonFileStore::new(&config.data_dir));
        Self::with_parts(config, content, store, StdRng::from_os_rng())
    }

    pub fn with_parts(
        config: Config,
        content: Box<dyn ContentSource>,
        store: Box<dyn ProgressStore>,
        rng: StdRng,
    ) -> Self {
        Self {
            config,
            content,
            tracker: Mutex::new(ProgressTracker::from_boxed(store)),
            rng: Mutex::new(rng),
        }
    }

    pub fn tracker(&self) -> MutexGuard<'_, ProgressTracker> {
        self.tracker.lock().expect("tracker lock")
    }

    pub fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().expect("rng lock")
    }
}
