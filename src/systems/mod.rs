//! Game systems.
//!
//! This module groups all ECS systems that advance simulation, input, and
//! rendering.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animations and the level clock
//! - [`audio`] – bridge with the audio thread (poll/update message queues)
//! - [`cleanup`] – despawn defeated enemies, the boss and collected pickups
//! - [`collision`] – pickups, contact damage and sword hits
//! - [`enemy`] – enemy patrols and the boss pattern
//! - [`gamestate`] – pending state transitions and run conditions
//! - [`input`] – feed an input source into [`crate::resources::input::InputState`]
//! - [`level`] – load levels, spawn their entities and run level transitions
//! - [`pause`] – propagate the pause flag to every behavior machine
//! - [`player`] – player actions, timers and camera follow
//! - [`render`] – compose the frame into a presentation sink
//! - [`screen`] – screen flow and the per-screen enter hooks
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod audio;
pub mod cleanup;
pub mod collision;
pub mod enemy;
pub mod gamestate;
pub mod input;
pub mod level;
pub mod pause;
pub mod player;
pub mod render;
pub mod screen;
pub mod time;
