//! High score persistence
//!
//! A single best score survives between sessions. It is read once at boot and
//! written back at session end only when beaten.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Key-value style store for the best score
pub trait HighScoreStore {
    fn load(&self) -> Result<u64, StoreError>;
    fn save(&mut self, score: u64) -> Result<(), StoreError>;
}

/// In-memory store (tests, headless runs without a file)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub score: u64,
}

impl MemoryStore {
    pub fn new(score: u64) -> Self {
        Self { score }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u64, StoreError> {
        Ok(self.score)
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        self.score = score;
        Ok(())
    }
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    highscore: u64,
}

/// JSON file store (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for FileStore {
    /// A missing file means no score yet
    fn load(&self) -> Result<u64, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => {
                let record: HighScoreRecord = serde_json::from_str(&json)?;
                Ok(record.highscore)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&HighScoreRecord { highscore: score })?;
        std::fs::write(&self.path, json)?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "starly_highscore";

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable("LocalStorage"))
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<u64, StoreError> {
        let storage = Self::storage()?;
        let raw = storage
            .get_item(Self::STORAGE_KEY)
            .map_err(|_| StoreError::Unavailable("LocalStorage read"))?;
        // Stored as a bare integer string
        Ok(raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0))
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(Self::STORAGE_KEY, &score.to_string())
            .map_err(|_| StoreError::Unavailable("LocalStorage write"))?;
        log::info!("High score {} saved", score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load().unwrap(), 0);
        store.save(420).unwrap();
        assert_eq!(store.load().unwrap(), 420);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_missing_file_is_zero() {
        let path = std::env::temp_dir().join(format!(
            "star_collector_missing_{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let store = FileStore::new(&path);
        assert_eq!(store.load().unwrap(), 0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_persists() {
        let path = std::env::temp_dir().join(format!(
            "star_collector_hs_{}.json",
            std::process::id()
        ));
        let mut store = FileStore::new(&path);
        store.save(1234).unwrap();
        assert_eq!(FileStore::new(&path).load().unwrap(), 1234);
        let _ = std::fs::remove_file(&path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_corrupt_is_error() {
        let path = std::env::temp_dir().join(format!(
            "star_collector_bad_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "not json").unwrap();
        let result = FileStore::new(&path).load();
        assert!(matches!(result, Err(StoreError::Json(_))));
        let _ = std::fs::remove_file(&path);
    }
}
