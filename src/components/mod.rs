//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animatedtile`] – background tile cycling through gids on the level clock
//! - [`animation`] – playback state of a sprite clip
//! - [`behavior`] – capability traits shared by creatures and pickups
//! - [`boss`] – the multi-hit boss machine
//! - [`boxcollider`] – axis-aligned footprint and the [`Rect`](boxcollider::Rect) helper
//! - [`door`] – level exit, optionally locked
//! - [`enemy`] – patrolling enemy machine
//! - [`facing`] – horizontal facing and grid directions
//! - [`levelentity`] – marker for entities owned by the loaded level
//! - [`mapposition`] – grid-aligned world position
//! - [`pickup`] – coins, hearts and keys
//! - [`player`] – the player machine

pub mod animatedtile;
pub mod animation;
pub mod behavior;
pub mod boss;
pub mod boxcollider;
pub mod door;
pub mod enemy;
pub mod facing;
pub mod levelentity;
pub mod mapposition;
pub mod pickup;
pub mod player;
