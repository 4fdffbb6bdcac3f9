//! Per-level state that is not an entity: the sequence, the level-to-level
//! transition, the composited background and the animated-tile clock.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::info;

use crate::resources::tilemap::Tileposition;

pub const LEVEL_TRANSITION_DURATION: f32 = 0.5;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LevelState {
    pub sequence: Vec<String>,
    /// Id of the level currently loaded, if any.
    pub loaded: Option<String>,
    pub tileset: Arc<str>,
    pub tile_size: u32,
    /// Tiles drawn under everything, in layer order.
    pub background: Vec<Tileposition>,
    pub transition_started: Option<f32>,
    /// Set once advancing ran past the last level.
    pub completed: bool,
    /// Seconds of unpaused play in this level; drives animated tiles.
    pub clock: f32,
    pub music: Option<String>,
}

impl LevelState {
    pub fn new(sequence: Vec<String>) -> Self {
        Self {
            sequence,
            loaded: None,
            tileset: Arc::from(""),
            tile_size: 16,
            background: Vec::new(),
            transition_started: None,
            completed: false,
            clock: 0.0,
            music: None,
        }
    }

    pub fn level_id(&self, index: usize) -> Option<&str> {
        self.sequence.get(index).map(String::as_str)
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.sequence.len()
    }

    /// Start the fade to the next level; rejected if one is already running.
    pub fn start_transition(&mut self, now: f32) -> bool {
        if self.transition_started.is_some() {
            return false;
        }
        info!("Level transition started");
        self.transition_started = Some(now);
        true
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition_started.is_some()
    }

    pub fn transition_done(&self, now: f32) -> bool {
        self.transition_started
            .map(|t| now - t >= LEVEL_TRANSITION_DURATION)
            .unwrap_or(false)
    }
}
