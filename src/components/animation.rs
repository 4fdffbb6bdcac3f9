//! Per-entity animation playback state.
//!
//! The clip data lives in [`AnimationStore`](crate::resources::animationstore::AnimationStore);
//! this component only records which clip of which set is playing and how far
//! along it is. [`crate::systems::animation::animation`] drives it each tick.

use bevy_ecs::prelude::Component;

use crate::components::behavior::Pausable;
use crate::resources::animationstore::AnimationClip;

#[derive(Debug, Clone, Component, PartialEq)]
pub struct Animation {
    /// Key of the [`AnimationSet`](crate::resources::animationstore::AnimationSet) this entity draws from.
    pub set_key: String,
    /// Active clip; empty until the first `play`.
    pub clip: String,
    pub frame_index: usize,
    /// Seconds accumulated since the last frame change.
    pub elapsed_time: f32,
    /// Set once a non-looping clip has held its last frame.
    pub finished: bool,
    pub paused: bool,
}

impl Animation {
    pub fn new(set_key: impl Into<String>) -> Self {
        Self {
            set_key: set_key.into(),
            clip: String::new(),
            frame_index: 0,
            elapsed_time: 0.0,
            finished: false,
            paused: false,
        }
    }

    pub fn playing(set_key: impl Into<String>, clip: &str) -> Self {
        let mut anim = Self::new(set_key);
        anim.play(clip, true);
        anim
    }

    /// Select a clip. Re-playing the active clip without `force_restart` is a no-op.
    ///
    /// Returns whether playback was (re)started.
    pub fn play(&mut self, clip: &str, force_restart: bool) -> bool {
        if self.clip == clip && !force_restart {
            return false;
        }
        self.clip.clear();
        self.clip.push_str(clip);
        self.frame_index = 0;
        self.elapsed_time = 0.0;
        self.finished = false;
        true
    }

    /// Advance by `dt` seconds against the active clip's timing.
    pub fn update(&mut self, dt: f32, clip: &AnimationClip) {
        if self.paused || self.finished || clip.frames.is_empty() {
            return;
        }
        self.elapsed_time += dt;
        if self.elapsed_time < clip.duration {
            return;
        }
        self.elapsed_time -= clip.duration.max(0.0);
        self.frame_index += 1;
        if self.frame_index >= clip.frames.len() {
            if clip.looped {
                self.frame_index = 0;
            } else {
                self.frame_index = clip.frames.len() - 1;
                self.finished = true;
            }
        }
    }

    /// Frame index clamped into the clip's frame list.
    pub fn clamped_index(&self, clip: &AnimationClip) -> usize {
        self.frame_index.min(clip.frames.len().saturating_sub(1))
    }
}

impl Pausable for Animation {
    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
