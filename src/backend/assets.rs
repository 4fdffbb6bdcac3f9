//! Asset bootstrap: textures on the GPU, sounds and music on the audio thread.
use std::path::Path;

use log::{info, warn};
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use tilequest::events::audio::AudioCmd;
use tilequest::resources::assetcatalog::{AssetCatalog, scan_assets};

/// Loaded textures by key. Lives on the main thread next to the window.
#[derive(Default)]
pub struct TextureStore {
    pub map: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn get(&self, key: &str) -> Option<&Texture2D> {
        self.map.get(key)
    }
}

pub struct LoadedAssets {
    pub textures: TextureStore,
    pub catalog: AssetCatalog,
    /// Load commands for the audio thread, to queue once the bridge is up.
    pub audio_cmds: Vec<AudioCmd>,
}

/// Load everything [`scan_assets`] finds under `root`.
///
/// Images that fail to load are left out of the catalog, so the core draws
/// placeholders for them.
pub fn load_assets(rl: &mut RaylibHandle, thread: &RaylibThread, root: &Path) -> LoadedAssets {
    let manifest = scan_assets(root);
    let mut textures = TextureStore::default();
    let mut catalog = AssetCatalog::new();
    let mut audio_cmds = Vec::new();

    for (key, path) in &manifest.images {
        let Some(path_str) = path.to_str() else {
            warn!("Skipping image with non UTF-8 path {:?}", path);
            continue;
        };
        match rl.load_texture(thread, path_str) {
            Ok(texture) => {
                catalog.insert_sheet(key.clone(), texture.width as u32, texture.height as u32);
                textures.map.insert(key.clone(), texture);
            }
            Err(e) => warn!("Failed to load image '{}': {}", key, e),
        }
    }
    for (id, path) in &manifest.sounds {
        catalog.insert_sound(id.clone());
        audio_cmds.push(AudioCmd::LoadFx {
            id: id.clone(),
            path: path.to_string_lossy().into_owned(),
        });
    }
    for (id, path) in &manifest.music {
        catalog.insert_music(id.clone());
        audio_cmds.push(AudioCmd::LoadMusic {
            id: id.clone(),
            path: path.to_string_lossy().into_owned(),
        });
    }
    info!(
        "Loaded {} image(s), queued {} sound(s) and {} music track(s)",
        textures.map.len(),
        manifest.sounds.len(),
        manifest.music.len()
    );

    LoadedAssets {
        textures,
        catalog,
        audio_cmds,
    }
}
