//! Browser LocalStorage store (wasm32 only)

use super::{BestScoreStore, StoreError};

/// Reads and writes scores as decimal strings in `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

impl BestScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        let storage = Self::storage()?;
        let Some(text) = storage.get_item(key).map_err(|_| StoreError::Unavailable)? else {
            return Ok(None);
        };
        text.trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| StoreError::Corrupt {
                key: key.to_string(),
                value: text,
            })
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, &value.to_string())
            .map_err(|_| StoreError::Unavailable)
    }
}
