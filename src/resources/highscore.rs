//! High-score persistence: one non-negative integer in a text file.

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use log::{debug, info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("failed to write high score to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct HighScoreStore {
    path: Option<PathBuf>,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A store that never touches disk; loads 0 and ignores saves.
    pub fn detached() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the stored value. Missing or unreadable data yields 0.
    pub fn load(&self) -> u32 {
        let Some(path) = &self.path else {
            return 0;
        };
        match std::fs::read_to_string(path) {
            Ok(text) => match text.trim().parse::<u32>() {
                Ok(score) => {
                    debug!("High score {} loaded from {:?}", score, path);
                    score
                }
                Err(e) => {
                    warn!("High score file {:?} unreadable ({}), using 0", path, e);
                    0
                }
            },
            Err(e) => {
                debug!("No high score at {:?} ({}), using 0", path, e);
                0
            }
        }
    }

    /// Write `score`, creating the parent directory if needed.
    pub fn save(&self, score: u32) -> Result<(), HighScoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, score.to_string())
        };
        write().map_err(|source| HighScoreError::Write {
            path: path.clone(),
            source,
        })?;
        info!("High score {} saved to {:?}", score, path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("data").join("highscore.txt"));
        store.save(1234).unwrap();
        assert_eq!(store.load(), 1234);
    }

    #[test]
    fn missing_or_corrupt_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        let store = HighScoreStore::new(&path);
        assert_eq!(store.load(), 0);
        std::fs::write(&path, "not a number").unwrap();
        assert_eq!(store.load(), 0);
        std::fs::write(&path, "-5").unwrap();
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn detached_store_is_inert() {
        let store = HighScoreStore::detached();
        assert!(store.save(99).is_ok());
        assert_eq!(store.load(), 0);
    }
}
