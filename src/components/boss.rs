//! Boss behavior machine.
//!
//! The boss repeats a fixed six-step route, three tiles per step, and takes
//! several hits. A step that cannot progress is skipped at once. Hurt pauses
//! the route without losing the step index or progress.

use bevy_ecs::prelude::Component;

use crate::components::animation::Animation;
use crate::components::behavior::{Behavior, Hit, Pausable, Rejected, Terrain, blink_visible};
use crate::components::facing::{Direction, Facing};
use crate::components::mapposition::MapPosition;
use crate::resources::animationstore::{AnimationClip, AnimationSet};

pub const BOSS_SET: &str = "boss";
pub const BOSS_SIZE: i32 = 32;
pub const BOSS_HEALTH: u32 = 3;
pub const BOSS_STEP_TILES: u32 = 3;
pub const BOSS_MOVE_COOLDOWN: f32 = 0.3;
pub const BOSS_HURT_DURATION: f32 = 0.8;
pub const BOSS_REMOVAL_DELAY: f32 = 3.0;
pub const BOSS_HIT_BONUS: u32 = 25;
pub const BOSS_DEFEAT_BONUS: u32 = 500;
pub const BOSS_PATTERN: [Direction; 6] = [
    Direction::Right,
    Direction::Left,
    Direction::Left,
    Direction::Right,
    Direction::Down,
    Direction::Up,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossState {
    Moving,
    Hurt,
    Dying,
}

#[derive(Component, Debug, Clone)]
pub struct Boss {
    pub state: BossState,
    pub health: u32,
    pub facing: Facing,
    pub step_index: usize,
    pub step_progress: u32,
    pub last_move: f32,
    pub state_entered: f32,
    pub defeated_at: Option<f32>,
    pub paused: bool,
}

impl Boss {
    pub fn new(now: f32) -> Self {
        Self {
            state: BossState::Moving,
            health: BOSS_HEALTH,
            facing: Facing::Right,
            step_index: 0,
            step_progress: 0,
            last_move: now,
            state_entered: now,
            defeated_at: None,
            paused: false,
        }
    }

    pub fn direction(&self) -> Direction {
        BOSS_PATTERN[self.step_index % BOSS_PATTERN.len()]
    }

    fn advance_step(&mut self) {
        self.step_index = (self.step_index + 1) % BOSS_PATTERN.len();
        self.step_progress = 0;
    }

    fn play_walk(&mut self, anim: &mut Animation, restart: bool) {
        self.facing = match self.direction() {
            Direction::Right | Direction::Down => Facing::Right,
            Direction::Left | Direction::Up => Facing::Left,
        };
        anim.play(&format!("walk_{}", self.facing.as_str()), restart);
    }

    pub fn update(&mut self, pos: &mut MapPosition, now: f32, terrain: &dyn Terrain, anim: &mut Animation) {
        if self.paused {
            return;
        }
        match self.state {
            BossState::Dying => {}
            BossState::Hurt => {
                if now - self.state_entered >= BOSS_HURT_DURATION {
                    self.state = BossState::Moving;
                    self.state_entered = now;
                    self.play_walk(anim, true);
                }
            }
            BossState::Moving => {
                if now - self.last_move < BOSS_MOVE_COOLDOWN {
                    return;
                }
                let (dx, dy) = self.direction().delta();
                let dest = pos.offset_tiles(dx, dy);
                if !terrain.in_bounds(dest.x, dest.y, BOSS_SIZE)
                    || terrain.is_area_blocked(dest.x, dest.y, BOSS_SIZE)
                {
                    self.advance_step();
                    self.play_walk(anim, false);
                    return;
                }
                *pos = dest;
                self.last_move = now;
                self.step_progress += 1;
                if self.step_progress >= BOSS_STEP_TILES {
                    self.advance_step();
                }
                self.play_walk(anim, false);
            }
        }
    }

    pub fn take_damage(&mut self, now: f32, anim: &mut Animation) -> Result<Hit, Rejected> {
        if self.is_hurt_or_dying() {
            return Err(Rejected::Busy);
        }
        self.health = self.health.saturating_sub(1);
        self.state_entered = now;
        anim.play(&format!("hurt_{}", self.facing.as_str()), true);
        if self.health == 0 {
            self.state = BossState::Dying;
            self.defeated_at = Some(now);
            Ok(Hit::Fatal)
        } else {
            self.state = BossState::Hurt;
            Ok(Hit::Hurt)
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated_at.is_some()
    }

    pub fn animation_set() -> AnimationSet {
        AnimationSet::new("boss_slime", BOSS_SIZE as u32)
            .with_clip("idle_right", AnimationClip::row(0, 0..2, 0.6, true))
            .with_clip("idle_left", AnimationClip::row(1, 0..2, 0.6, true))
            .with_clip("walk_right", AnimationClip::row(2, 0..4, 0.4, true))
            .with_clip("walk_left", AnimationClip::row(3, 0..4, 0.4, true))
            .with_clip("hurt_right", AnimationClip::row(4, 0..4, 0.2, false))
            .with_clip("hurt_left", AnimationClip::row(5, 0..4, 0.2, false))
    }
}

impl Behavior for Boss {
    fn size(&self) -> i32 {
        BOSS_SIZE
    }

    fn is_hurt_or_dying(&self) -> bool {
        matches!(self.state, BossState::Hurt | BossState::Dying)
    }

    fn removal_eligible(&self, now: f32) -> bool {
        self.defeated_at
            .map(|t| now - t >= BOSS_REMOVAL_DELAY)
            .unwrap_or(false)
    }

    fn visible_at(&self, now: f32) -> bool {
        match self.state {
            BossState::Hurt => blink_visible(now, 15.0),
            BossState::Dying => blink_visible(now, 8.0),
            BossState::Moving => true,
        }
    }
}

impl Pausable for Boss {
    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
