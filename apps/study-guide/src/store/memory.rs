//! In-memory store.

use super::{ProgressStore, StoreError};
use std::sync::{Arc, Mutex};
use study_core::ProgressData;

/// Clones share the same data, so a test can keep a handle and inspect what
/// was saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    data: ProgressData,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: ProgressData) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner { data, saves: 0 })),
        }
    }

    /// Last saved data.
    pub fn snapshot(&self) -> ProgressData {
        self.inner.lock().expect("store lock").data.clone()
    }

    pub fn save_count(&self) -> usize {
        self.inner.lock().expect("store lock").saves
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> ProgressData {
        self.snapshot()
    }

    fn save(&self, data: &ProgressData) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store lock");
        inner.data = data.clone();
        inner.saves += 1;
        Ok(())
    }
}
