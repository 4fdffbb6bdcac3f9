//! Registry of assets the presentation backend managed to load.
//!
//! The core never touches pixels or audio buffers. It only needs to know
//! which sheet keys exist (and their size, to cut frames), which sound and
//! music ids are playable, and where the files live on disk for bootstrap.

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use log::{debug, warn};
use rustc_hash::{FxHashMap, FxHashSet};

/// Pixel size of a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetInfo {
    pub width: u32,
    pub height: u32,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct AssetCatalog {
    sheets: FxHashMap<String, SheetInfo>,
    sounds: FxHashSet<String>,
    music: FxHashSet<String>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_sheet(&mut self, key: impl Into<String>, width: u32, height: u32) {
        self.sheets.insert(key.into(), SheetInfo { width, height });
    }

    pub fn sheet(&self, key: &str) -> Option<SheetInfo> {
        self.sheets.get(key).copied()
    }

    pub fn has_sheet(&self, key: &str) -> bool {
        self.sheets.contains_key(key)
    }

    pub fn insert_sound(&mut self, id: impl Into<String>) {
        self.sounds.insert(id.into());
    }

    pub fn has_sound(&self, id: &str) -> bool {
        self.sounds.contains(id)
    }

    pub fn insert_music(&mut self, id: impl Into<String>) {
        self.music.insert(id.into());
    }

    pub fn has_music(&self, id: &str) -> bool {
        self.music.contains(id)
    }
}

/// Files found under an asset root, keyed by file stem.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AssetManifest {
    pub images: Vec<(String, PathBuf)>,
    pub sounds: Vec<(String, PathBuf)>,
    pub music: Vec<(String, PathBuf)>,
}

/// List `images/*.png`, `sounds/*.{wav,ogg}` and `music/*.{ogg,mp3}` under `root`.
///
/// Missing directories yield empty lists; entries are sorted by key.
pub fn scan_assets(root: &Path) -> AssetManifest {
    AssetManifest {
        images: scan_dir(&root.join("images"), &["png"]),
        sounds: scan_dir(&root.join("sounds"), &["wav", "ogg"]),
        music: scan_dir(&root.join("music"), &["ogg", "mp3"]),
    }
}

fn scan_dir(dir: &Path, extensions: &[&str]) -> Vec<(String, PathBuf)> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Asset directory {:?} unavailable: {}", dir, e);
            return Vec::new();
        }
    };
    let mut found: Vec<(String, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
                .unwrap_or(false)
        })
        .filter_map(|path| {
            let stem = path.file_stem()?.to_str()?.to_string();
            Some((stem, path))
        })
        .collect();
    found.sort();
    debug!("Found {} asset(s) in {:?}", found.len(), dir);
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_picks_known_extensions_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images");
        let sounds = dir.path().join("sounds");
        std::fs::create_dir_all(&images).unwrap();
        std::fs::create_dir_all(&sounds).unwrap();
        std::fs::write(images.join("player.png"), b"").unwrap();
        std::fs::write(images.join("notes.txt"), b"").unwrap();
        std::fs::write(sounds.join("hit_7.wav"), b"").unwrap();

        let manifest = scan_assets(dir.path());
        let keys: Vec<&str> = manifest.images.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["player"]);
        assert_eq!(manifest.sounds.len(), 1);
        assert!(manifest.music.is_empty());
    }

    #[test]
    fn catalog_tracks_each_kind_separately() {
        let mut catalog = AssetCatalog::new();
        catalog.insert_sheet("player", 96, 128);
        catalog.insert_music("village");
        assert_eq!(catalog.sheet("player").map(|s| s.width), Some(96));
        assert!(catalog.has_music("village"));
        assert!(!catalog.has_sound("village"));
    }
}
