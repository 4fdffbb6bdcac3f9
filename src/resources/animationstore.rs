//! Animation definitions shared by every entity of a class.
//!
//! A set groups the clips cut from one sprite sheet. Entities point at a set
//! through [`Animation::set_key`](crate::components::animation::Animation) and
//! select clips inside it by name.

use std::ops::Range;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

/// Immutable clip: ordered `(row, col)` cells, per-frame duration and loop flag.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub frames: Vec<(u32, u32)>,
    /// Seconds each frame stays on screen.
    pub duration: f32,
    pub looped: bool,
}

impl AnimationClip {
    pub fn new(frames: Vec<(u32, u32)>, duration: f32, looped: bool) -> Self {
        Self {
            frames,
            duration,
            looped,
        }
    }

    /// Consecutive columns of a single sheet row.
    pub fn row(row: u32, cols: Range<u32>, duration: f32, looped: bool) -> Self {
        Self::new(cols.map(|col| (row, col)).collect(), duration, looped)
    }
}

/// Clips cut from one sheet with a square frame size.
#[derive(Debug, Clone)]
pub struct AnimationSet {
    /// Sheet key in [`AssetCatalog`](crate::resources::assetcatalog::AssetCatalog).
    pub sheet: Arc<str>,
    pub frame_size: u32,
    pub clips: FxHashMap<String, AnimationClip>,
}

impl AnimationSet {
    pub fn new(sheet: &str, frame_size: u32) -> Self {
        Self {
            sheet: Arc::from(sheet),
            frame_size,
            clips: FxHashMap::default(),
        }
    }

    pub fn with_clip(mut self, name: impl Into<String>, clip: AnimationClip) -> Self {
        self.clips.insert(name.into(), clip);
        self
    }

    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.get(name)
    }
}

/// Central registry of animation sets keyed by string IDs.
#[derive(Resource, Debug, Default)]
pub struct AnimationStore {
    pub sets: FxHashMap<String, AnimationSet>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, set: AnimationSet) {
        self.sets.insert(key.into(), set);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.sets.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&AnimationSet> {
        self.sets.get(key)
    }

    /// Clip lookup through the set key; `None` if either is unknown.
    pub fn clip(&self, set_key: &str, clip: &str) -> Option<&AnimationClip> {
        self.sets.get(set_key).and_then(|set| set.clip(clip))
    }
}
