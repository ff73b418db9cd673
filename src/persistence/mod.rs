//! Best-score persistence
//!
//! The game stores a single integer under [`BEST_SCORE_KEY`]. Backends:
//! - [`MemoryStore`]: in-process, for tests and headless runs
//! - [`FileStore`]: JSON object on disk (native)
//! - [`LocalStorageStore`]: browser LocalStorage (wasm32)
//!
//! Persistence is best-effort. Callers log failures and keep playing.

use std::collections::HashMap;

use thiserror::Error;

/// Key the best score is stored under
pub const BEST_SCORE_KEY: &str = "BEST_SCORE";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("stored value for {key} is not a score: {value:?}")]
    Corrupt { key: String, value: String },
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Synchronous integer key/value store
pub trait BestScoreStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError>;
    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError>;
}

impl<S: BestScoreStore + ?Sized> BestScoreStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u32) -> Self {
        let mut store = Self::new();
        store.values.insert(BEST_SCORE_KEY.to_string(), best);
        store
    }
}

impl BestScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(target_arch = "wasm32")]
mod local_storage;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;
