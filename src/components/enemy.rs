//! Patrolling enemy behavior machine.
//!
//! An enemy walks `blocks` tiles along its axis, idles, turns around and
//! repeats. Hits put it in `Hurt`; the level decides when to call
//! [`Enemy::start_death`], after which removal is purely time based.

use bevy_ecs::prelude::Component;

use crate::components::animation::Animation;
use crate::components::behavior::{Behavior, Hit, Pausable, Rejected, Terrain, blink_visible};
use crate::components::facing::Facing;
use crate::components::mapposition::{MapPosition, TILE_SIZE};
use crate::resources::animationstore::{AnimationClip, AnimationSet};

pub const DEFAULT_ENEMY_KIND: &str = "rat";
pub const DEFAULT_PATROL_BLOCKS: u32 = 2;
pub const DEFAULT_ENEMY_HEALTH: u32 = 1;
pub const ENEMY_MOVE_COOLDOWN: f32 = 0.3;
pub const ENEMY_IDLE_DURATION: f32 = 3.0;
pub const ENEMY_HURT_DURATION: f32 = 0.8;
pub const ENEMY_REMOVAL_DELAY: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatrolAxis {
    #[default]
    Horizontal,
    Vertical,
}

impl PatrolAxis {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Some(PatrolAxis::Horizontal),
            "vertical" => Some(PatrolAxis::Vertical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Moving,
    Idle,
    Hurt,
    Dying,
}

#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub kind: String,
    pub axis: PatrolAxis,
    pub blocks: u32,
    pub blocks_moved: u32,
    pub facing: Facing,
    pub state: EnemyState,
    pub state_entered: f32,
    pub last_move: f32,
    pub health: u32,
    pub paused: bool,
}

/// Animation set key for an enemy kind; each kind has its own sheet.
pub fn enemy_set_key(kind: &str) -> String {
    format!("enemy_{}", kind)
}

impl Enemy {
    pub fn new(kind: impl Into<String>, axis: PatrolAxis, blocks: u32, now: f32) -> Self {
        Self {
            kind: kind.into(),
            axis,
            blocks: blocks.max(1),
            blocks_moved: 0,
            facing: Facing::Right,
            state: EnemyState::Moving,
            state_entered: now,
            last_move: now,
            health: DEFAULT_ENEMY_HEALTH,
            paused: false,
        }
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.max(1);
        self
    }

    pub fn set_key(&self) -> String {
        enemy_set_key(&self.kind)
    }

    /// Step in tiles for the current facing. Vertical patrols treat "right" as down.
    fn step(&self) -> (i32, i32) {
        match self.axis {
            PatrolAxis::Horizontal => (self.facing.dx(), 0),
            PatrolAxis::Vertical => (0, self.facing.dx()),
        }
    }

    fn enter(&mut self, state: EnemyState, now: f32) {
        self.state = state;
        self.state_entered = now;
    }

    fn go_idle(&mut self, now: f32, anim: &mut Animation) {
        self.enter(EnemyState::Idle, now);
        anim.play(&format!("idle_{}", self.facing.as_str()), false);
    }

    pub fn update(&mut self, pos: &mut MapPosition, now: f32, terrain: &dyn Terrain, anim: &mut Animation) {
        if self.paused {
            return;
        }
        match self.state {
            EnemyState::Moving => {
                if now - self.last_move < ENEMY_MOVE_COOLDOWN {
                    return;
                }
                let (dx, dy) = self.step();
                let dest = pos.offset_tiles(dx, dy);
                if terrain.is_blocked(dest.x, dest.y) {
                    self.go_idle(now, anim);
                    return;
                }
                *pos = dest;
                self.last_move = now;
                self.blocks_moved += 1;
                anim.play(&format!("walk_{}", self.facing.as_str()), false);
                if self.blocks_moved >= self.blocks {
                    self.go_idle(now, anim);
                }
            }
            EnemyState::Idle => {
                if now - self.state_entered >= ENEMY_IDLE_DURATION {
                    self.facing = self.facing.flipped();
                    self.blocks_moved = 0;
                    self.enter(EnemyState::Moving, now);
                    anim.play(&format!("walk_{}", self.facing.as_str()), true);
                }
            }
            EnemyState::Hurt => {
                if now - self.state_entered >= ENEMY_HURT_DURATION {
                    self.enter(EnemyState::Moving, now);
                    anim.play(&format!("walk_{}", self.facing.as_str()), true);
                }
            }
            EnemyState::Dying => {}
        }
    }

    /// One point of damage. `Hit::Fatal` tells the caller to trigger the death.
    pub fn take_damage(&mut self, now: f32, anim: &mut Animation) -> Result<Hit, Rejected> {
        if self.is_hurt_or_dying() {
            return Err(Rejected::Busy);
        }
        self.health = self.health.saturating_sub(1);
        self.enter(EnemyState::Hurt, now);
        anim.play(&format!("hurt_{}", self.facing.as_str()), true);
        Ok(if self.health == 0 { Hit::Fatal } else { Hit::Hurt })
    }

    pub fn start_death(&mut self, now: f32) {
        if self.state != EnemyState::Dying {
            self.enter(EnemyState::Dying, now);
        }
    }

    pub fn animation_set(kind: &str) -> AnimationSet {
        AnimationSet::new(&enemy_set_key(kind), TILE_SIZE as u32)
            .with_clip("idle_right", AnimationClip::row(0, 0..2, 0.6, true))
            .with_clip("idle_left", AnimationClip::row(1, 0..2, 0.6, true))
            .with_clip("walk_right", AnimationClip::row(2, 0..3, 0.4, true))
            .with_clip("walk_left", AnimationClip::row(3, 0..3, 0.4, true))
            .with_clip("hurt_right", AnimationClip::row(4, 0..4, 0.2, false))
            .with_clip("hurt_left", AnimationClip::row(5, 0..4, 0.2, false))
    }
}

impl Behavior for Enemy {
    fn is_hurt_or_dying(&self) -> bool {
        matches!(self.state, EnemyState::Hurt | EnemyState::Dying)
    }

    fn removal_eligible(&self, now: f32) -> bool {
        self.state == EnemyState::Dying && now - self.state_entered >= ENEMY_REMOVAL_DELAY
    }

    fn visible_at(&self, now: f32) -> bool {
        self.state != EnemyState::Dying || blink_visible(now, 10.0)
    }
}

impl Pausable for Enemy {
    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::collisiongrid::CollisionGrid;

    fn rat(now: f32) -> (Enemy, MapPosition, Animation) {
        let enemy = Enemy::new("rat", PatrolAxis::Horizontal, 2, now);
        let anim = Animation::playing(enemy.set_key(), "walk_right");
        (enemy, MapPosition::new(16, 16), anim)
    }

    #[test]
    fn patrol_walks_blocks_idles_three_seconds_then_turns() {
        let grid = CollisionGrid::new(10, 10);
        let (mut e, mut pos, mut anim) = rat(0.0);

        e.update(&mut pos, 0.25, &grid, &mut anim);
        assert_eq!(pos.x, 16, "cooldown not yet elapsed");
        e.update(&mut pos, 0.5, &grid, &mut anim);
        assert_eq!(pos.x, 32);
        e.update(&mut pos, 1.0, &grid, &mut anim);
        assert_eq!(pos.x, 48);
        assert_eq!(e.state, EnemyState::Idle);
        assert_eq!(anim.clip, "idle_right");

        e.update(&mut pos, 3.75, &grid, &mut anim);
        assert_eq!(e.state, EnemyState::Idle);
        e.update(&mut pos, 4.0, &grid, &mut anim);
        assert_eq!(e.state, EnemyState::Moving);
        assert_eq!(e.facing, Facing::Left);
        assert_eq!(anim.clip, "walk_left");

        e.update(&mut pos, 4.5, &grid, &mut anim);
        assert_eq!(pos.x, 32);
    }

    #[test]
    fn blocked_step_goes_idle_without_moving() {
        let mut grid = CollisionGrid::new(10, 10);
        grid.set_blocked(2, 1, true);
        let (mut e, mut pos, mut anim) = rat(0.0);
        e.update(&mut pos, 0.5, &grid, &mut anim);
        assert_eq!(pos, MapPosition::new(16, 16));
        assert_eq!(e.state, EnemyState::Idle);
    }

    #[test]
    fn vertical_patrol_goes_down_when_facing_right() {
        let grid = CollisionGrid::new(10, 10);
        let mut e = Enemy::new("bat", PatrolAxis::Vertical, 3, 0.0);
        let mut anim = Animation::new(e.set_key());
        let mut pos = MapPosition::new(16, 16);
        e.update(&mut pos, 0.5, &grid, &mut anim);
        assert_eq!(pos, MapPosition::new(16, 32));
    }

    #[test]
    fn damage_rejected_while_hurt_then_recovers() {
        let (mut e, _, mut anim) = rat(0.0);
        e = e.with_health(2);
        let grid = CollisionGrid::new(10, 10);
        let mut pos = MapPosition::new(16, 16);
        assert_eq!(e.take_damage(1.0, &mut anim), Ok(Hit::Hurt));
        assert_eq!(e.take_damage(1.2, &mut anim), Err(Rejected::Busy));
        e.update(&mut pos, 1.5, &grid, &mut anim);
        assert_eq!(e.state, EnemyState::Hurt);
        e.update(&mut pos, 2.0, &grid, &mut anim);
        assert_eq!(e.state, EnemyState::Moving);
        assert_eq!(e.take_damage(2.5, &mut anim), Ok(Hit::Fatal));
    }

    #[test]
    fn removal_is_a_function_of_time_since_death() {
        let (mut e, _, _) = rat(0.0);
        e.start_death(2.0);
        assert!(!e.removal_eligible(2.5));
        assert!(e.removal_eligible(3.0));
        let mut anim = Animation::new(e.set_key());
        assert_eq!(e.take_damage(3.0, &mut anim), Err(Rejected::Busy));
    }

    #[test]
    fn axis_parsing_is_case_insensitive() {
        assert_eq!(PatrolAxis::parse("Vertical"), Some(PatrolAxis::Vertical));
        assert_eq!(PatrolAxis::parse("diagonal"), None);
    }
}
