//! Persistence for progress data.

pub mod error;
pub mod json_file;
pub mod memory;

pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use study_core::ProgressData;

/// Whole-document progress storage: read once, rewritten on every change.
pub trait ProgressStore: Send {
    /// Stored progress, or the zero state when nothing usable is stored.
    fn load(&self) -> ProgressData;
    fn save(&self, data: &ProgressData) -> Result<(), StoreError>;
}
