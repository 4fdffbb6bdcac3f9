//! Animation systems.
//!
//! - [`animation`] advances every [`Animation`] against its clip in the
//!   [`AnimationStore`]. Paused or finished animations stand still.
//! - [`advance_level_clock`] drives animated background tiles.
//!
//! Clip selection is not done here: behavior machines call
//! [`Animation::play`] when their state changes.
//!
//! # Related
//!
//! - [`crate::components::animation::Animation`] – per-entity animation state
//! - [`crate::resources::animationstore::AnimationStore`] – clip definitions
//! - [`crate::resources::framecache::FrameCache`] – frame lookup at draw time

use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::resources::animationstore::AnimationStore;
use crate::resources::level::LevelState;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback by the frame delta.
///
/// An animation whose set or clip is unknown is left alone; the render pass
/// shows the error placeholder for it.
pub fn animation(
    mut query: Query<&mut Animation>,
    animation_store: Res<AnimationStore>,
    time: Res<WorldTime>,
) {
    for mut anim in query.iter_mut() {
        if anim.paused || anim.finished {
            continue;
        }
        if let Some(clip) = animation_store.clip(&anim.set_key, &anim.clip) {
            anim.update(time.delta, clip);
        }
    }
}

/// Seconds of unpaused play in the current level.
pub fn advance_level_clock(mut level: ResMut<LevelState>, time: Res<WorldTime>) {
    level.clock += time.delta;
}
