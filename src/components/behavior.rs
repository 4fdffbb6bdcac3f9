//! Capabilities shared by the player, enemies, the boss and pickups.
//!
//! Each variant implements these traits independently; systems query them
//! uniformly instead of checking which concrete type they hold.

use crate::components::boxcollider::Rect;
use crate::components::mapposition::{MapPosition, TILE_SIZE};

/// Read-only view of the level's solidity, handed to behavior machines.
///
/// Machines never mutate terrain; only the level loader rebuilds it.
pub trait Terrain {
    /// Whether the tile containing the pixel `(x, y)` is solid. Outside the map is solid.
    fn is_blocked(&self, x: i32, y: i32) -> bool;

    /// Level size in pixels.
    fn level_size(&self) -> (i32, i32);

    /// Whether any tile under a square footprint of `size` pixels at `(x, y)` is solid.
    fn is_area_blocked(&self, x: i32, y: i32, size: i32) -> bool {
        let mut ty = 0;
        while ty < size {
            let mut tx = 0;
            while tx < size {
                if self.is_blocked(x + tx, y + ty) {
                    return true;
                }
                tx += TILE_SIZE;
            }
            ty += TILE_SIZE;
        }
        false
    }

    /// Whether a footprint of `size` pixels at `(x, y)` lies fully inside the level.
    fn in_bounds(&self, x: i32, y: i32, size: i32) -> bool {
        let (w, h) = self.level_size();
        x >= 0 && y >= 0 && x <= w - size && y <= h - size
    }
}

/// Why a request to a behavior machine was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    /// The current state does not accept the request (attacking, hurt, dying...).
    Busy,
    /// The request came before the cooldown elapsed.
    Cooldown,
    /// The destination tile is solid.
    Blocked,
    /// The destination lies outside the level.
    OutOfBounds,
    /// Damage during the post-hit invincibility window.
    Invincible,
}

/// Result of an accepted hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The target survives and plays its hurt reaction.
    Hurt,
    /// The target's health reached zero.
    Fatal,
}

/// Capability set common to every active creature in the level.
pub trait Behavior {
    /// Collision footprint edge in pixels.
    fn size(&self) -> i32 {
        TILE_SIZE
    }

    /// Collision rectangle at `pos`.
    fn tile_rect(&self, pos: MapPosition) -> Rect {
        Rect::new(pos.x, pos.y, self.size(), self.size())
    }

    /// True while hits must be ignored.
    fn is_hurt_or_dying(&self) -> bool;

    /// Pure function of elapsed time: may the entity leave the registry?
    fn removal_eligible(&self, now: f32) -> bool;

    /// Flicker and blink effects; `false` hides the entity this frame.
    fn visible_at(&self, now: f32) -> bool;
}

/// Anything that freezes its own clocks while the game is paused or frozen.
pub trait Pausable {
    fn set_paused(&mut self, paused: bool);
    fn is_paused(&self) -> bool;
}

/// Shared blink helper: hidden on odd slots of `rate` per second.
pub(crate) fn blink_visible(now: f32, rate: f32) -> bool {
    ((now * rate) as i64) % 2 == 0
}
