use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, warn};

use crate::game::score::BestScoreStore;

/// File name used when none is configured
pub const DEFAULT_SCORE_FILE: &str = "snake_best_score.txt";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access score file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("score file {path:?} does not contain an integer: {content:?}")]
    Parse { path: PathBuf, content: String },
}

/// Best score kept in a text file holding a single integer
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored score. A missing file is `Ok(None)`.
    pub fn try_load(&self) -> Result<Option<i32>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let first_line = content.lines().next().unwrap_or_default().trim();
        first_line
            .parse::<i32>()
            .map(Some)
            .map_err(|_| StorageError::Parse {
                path: self.path.clone(),
                content: first_line.to_string(),
            })
    }

    pub fn try_save(&self, score: i32) -> Result<(), StorageError> {
        std::fs::write(&self.path, score.to_string()).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_FILE)
    }
}

impl BestScoreStore for FileScoreStore {
    fn load_best_score(&mut self) -> i32 {
        match self.try_load() {
            Ok(Some(score)) => score,
            Ok(None) => {
                debug!(path = ?self.path, "no best score recorded yet");
                0
            }
            Err(e) => {
                warn!(error = %e, "could not load best score, starting from 0");
                0
            }
        }
    }

    fn save_best_score(&mut self, score: i32) {
        if let Err(e) = self.try_save(score) {
            warn!(error = %e, score, "could not save best score");
        }
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    best: i32,
    saved: Vec<i32>,
}

/// In-memory store. Clones share the same state, so a caller can keep a handle
/// to inspect what was saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryScoreStore {
    pub fn with_best(best: i32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryInner {
                best,
                saved: Vec::new(),
            })),
        }
    }

    /// Every value passed to `save_best_score`, oldest first
    pub fn saved(&self) -> Vec<i32> {
        self.inner
            .lock()
            .map(|inner| inner.saved.clone())
            .unwrap_or_default()
    }
}

impl BestScoreStore for MemoryScoreStore {
    fn load_best_score(&mut self) -> i32 {
        self.inner.lock().map(|inner| inner.best).unwrap_or_default()
    }

    fn save_best_score(&mut self, score: i32) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.best = score;
            inner.saved.push(score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = TempDir::new().unwrap();
        let mut store = FileScoreStore::new(dir.path().join("best.txt"));
        assert!(store.try_load().unwrap().is_none());
        assert_eq!(store.load_best_score(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best.txt");
        let mut store = FileScoreStore::new(&path);

        store.save_best_score(137);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "137");
        assert_eq!(store.load_best_score(), 137);
    }

    #[test]
    fn test_reads_trimmed_first_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best.txt");
        std::fs::write(&path, "  25 \nignored\n").unwrap();

        let mut store = FileScoreStore::new(&path);
        assert_eq!(store.load_best_score(), 25);
    }

    #[test]
    fn test_corrupt_file_loads_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best.txt");
        std::fs::write(&path, "not a number").unwrap();

        let mut store = FileScoreStore::new(&path);
        assert!(matches!(store.try_load(), Err(StorageError::Parse { .. })));
        assert_eq!(store.load_best_score(), 0);
    }

    #[test]
    fn test_failed_save_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let mut store = FileScoreStore::new(dir.path().join("missing").join("best.txt"));

        assert!(store.try_save(5).is_err());
        // Logged and swallowed
        store.save_best_score(5);
    }

    #[test]
    fn test_memory_store_shares_state() {
        let store = MemoryScoreStore::with_best(3);
        let mut handle = store.clone();

        assert_eq!(handle.load_best_score(), 3);
        handle.save_best_score(9);
        assert_eq!(store.saved(), vec![9]);
    }
}
