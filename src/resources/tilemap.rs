//! Level data and where it comes from.
//!
//! A [`TileMapProvider`] turns a level id into [`LevelData`]: tile layers,
//! an object layer with property bags and animated tiles. Gids are 1-based
//! indices into the level's tileset sheet; 0 is an empty cell.
//!
//! The shipped provider reads `<root>/<id>.json`:
//!
//! ```json
//! {
//!   "tile_size": 16, "map_width": 20, "map_height": 15, "tileset": "tiles",
//!   "layers": [{ "name": "colliders", "positions": [{ "x": 0, "y": 0, "id": 3 }] }],
//!   "objects": [{ "name": "enemy", "x": 64, "y": 32,
//!                 "properties": { "enemy_type": "rat", "blocks": 3 } }],
//!   "animated": [{ "x": 4, "y": 2, "frames": [{ "id": 9, "duration": 0.6 }] }]
//! }
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::Resource;
use log::warn;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const COLLIDERS_LAYER: &str = "colliders";
pub const BACKGROUND_LAYER: &str = "background";

/// Single tile placement within a layer.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Tileposition {
    /// X coordinate in tiles.
    pub x: u32,
    /// Y coordinate in tiles.
    pub y: u32,
    /// 1-based gid, 0 = empty.
    pub id: u32,
}

/// A named tile layer containing positions.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Tilelayer {
    pub name: String,
    #[serde(default)]
    pub positions: Vec<Tileposition>,
}

/// Typed object from the object layer. Position and size are in pixels.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MapObject {
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl MapObject {
    pub fn new(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width: 0.0,
            height: 0.0,
            properties: Map::new(),
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn str_prop(&self, key: &str) -> Option<&str> {
        match self.properties.get(key)? {
            Value::String(s) => Some(s.as_str()),
            other => {
                warn!("Object '{}' property '{}' is not a string: {}", self.name, key, other);
                None
            }
        }
    }

    /// Accepts JSON booleans and the strings "true"/"false".
    pub fn bool_prop(&self, key: &str) -> Option<bool> {
        match self.properties.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            other => {
                warn!("Object '{}' property '{}' is not a bool: {}", self.name, key, other);
                None
            }
        }
    }

    /// Accepts non-negative JSON integers and numeric strings.
    pub fn uint_prop(&self, key: &str) -> Option<u32> {
        let parsed = match self.properties.get(key)? {
            Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            Value::String(s) => s.trim().parse::<u32>().ok(),
            _ => None,
        };
        if parsed.is_none() {
            warn!(
                "Object '{}' property '{}' is not a non-negative integer: {:?}",
                self.name,
                key,
                self.properties.get(key)
            );
        }
        parsed
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AnimatedTileFrame {
    pub id: u32,
    pub duration: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AnimatedTileDef {
    pub x: u32,
    pub y: u32,
    pub frames: Vec<AnimatedTileFrame>,
}

/// Everything a level load needs.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LevelData {
    /// Size of a tile in pixels.
    pub tile_size: u32,
    /// Map width in tiles.
    pub map_width: u32,
    /// Map height in tiles.
    pub map_height: u32,
    /// Sheet key of the tileset image.
    #[serde(default)]
    pub tileset: String,
    #[serde(default)]
    pub layers: Vec<Tilelayer>,
    #[serde(default)]
    pub objects: Vec<MapObject>,
    #[serde(default)]
    pub animated: Vec<AnimatedTileDef>,
}

impl LevelData {
    pub fn new(map_width: u32, map_height: u32) -> Self {
        Self {
            tile_size: 16,
            map_width,
            map_height,
            tileset: String::from("tiles"),
            layers: Vec::new(),
            objects: Vec::new(),
            animated: Vec::new(),
        }
    }

    pub fn layer(&self, name: &str) -> Option<&Tilelayer> {
        self.layers.iter().find(|l| l.name == name)
    }
}

#[derive(Debug, Error)]
pub enum LevelLoadError {
    #[error("unknown level '{0}'")]
    Unknown(String),
    #[error("failed to read level file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse level file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of level data, keyed by level id.
pub trait TileMapProvider: Send + Sync {
    fn load(&self, level_id: &str) -> Result<LevelData, LevelLoadError>;
}

/// Reads `<root>/<level_id>.json`.
#[derive(Debug, Clone)]
pub struct JsonTileMapProvider {
    root: PathBuf,
}

impl JsonTileMapProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, level_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", level_id))
    }
}

impl TileMapProvider for JsonTileMapProvider {
    fn load(&self, level_id: &str) -> Result<LevelData, LevelLoadError> {
        let path = self.path_for(level_id);
        let text = std::fs::read_to_string(&path).map_err(|source| LevelLoadError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| LevelLoadError::Parse { path, source })
    }
}

/// Levels held in memory, for tests and generated content.
#[derive(Debug, Clone, Default)]
pub struct MemoryTileMapProvider {
    levels: FxHashMap<String, LevelData>,
}

impl MemoryTileMapProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, id: impl Into<String>, data: LevelData) -> Self {
        self.levels.insert(id.into(), data);
        self
    }
}

impl TileMapProvider for MemoryTileMapProvider {
    fn load(&self, level_id: &str) -> Result<LevelData, LevelLoadError> {
        self.levels
            .get(level_id)
            .cloned()
            .ok_or_else(|| LevelLoadError::Unknown(level_id.to_string()))
    }
}

/// The provider used by level loading.
#[derive(Resource)]
pub struct LevelSource(pub Box<dyn TileMapProvider>);

impl LevelSource {
    pub fn new(provider: impl TileMapProvider + 'static) -> Self {
        Self(Box::new(provider))
    }

    pub fn load(&self, level_id: &str) -> Result<LevelData, LevelLoadError> {
        self.0.load(level_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_provider_reads_minimal_level() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("level-1.json"),
            r#"{"tile_size":16,"map_width":2,"map_height":1,
                "layers":[{"name":"colliders","positions":[{"x":1,"y":0,"id":4}]}],
                "objects":[{"name":"player","x":0,"y":0}]}"#,
        )
        .unwrap();
        let provider = JsonTileMapProvider::new(dir.path());
        let level = provider.load("level-1").unwrap();
        assert_eq!(level.layer(COLLIDERS_LAYER).map(|l| l.positions.len()), Some(1));
        assert_eq!(level.objects[0].name, "player");
        assert!(level.animated.is_empty());
    }

    #[test]
    fn json_provider_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let provider = JsonTileMapProvider::new(dir.path());
        assert!(matches!(provider.load("nope"), Err(LevelLoadError::Io { .. })));
        std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
        assert!(matches!(provider.load("bad"), Err(LevelLoadError::Parse { .. })));
    }

    #[test]
    fn property_accessors_tolerate_strings() {
        let obj = MapObject::new("door", 0.0, 0.0)
            .with_property("locked", "False")
            .with_property("blocks", "4")
            .with_property("enemy_type", 3);
        assert_eq!(obj.bool_prop("locked"), Some(false));
        assert_eq!(obj.uint_prop("blocks"), Some(4));
        assert_eq!(obj.str_prop("enemy_type"), None);
        assert_eq!(obj.str_prop("missing"), None);
    }
}
