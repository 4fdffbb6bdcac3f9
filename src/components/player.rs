//! Player behavior machine.
//!
//! States: `Idle`, `Moving`, `Attacking`, `Hurt`, `Dying`. Movement is one
//! tile per accepted request, gated by a cooldown and the level terrain.
//! Attacks run a separate sword animation owned by the component; the body
//! animation is the entity's [`Animation`] component, passed in by systems.

use bevy_ecs::prelude::Component;

use crate::components::animation::Animation;
use crate::components::behavior::{Behavior, Hit, Pausable, Rejected, Terrain, blink_visible};
use crate::components::boxcollider::Rect;
use crate::components::facing::Facing;
use crate::components::mapposition::{MapPosition, TILE_SIZE};
use crate::resources::animationstore::{AnimationClip, AnimationSet, AnimationStore};

pub const PLAYER_SET: &str = "player";
pub const SWORD_SET: &str = "sword";
pub const PLAYER_MAX_HEALTH: u32 = 3;
pub const MOVE_COOLDOWN: f32 = 0.15;
pub const ATTACK_DURATION: f32 = 0.5;
pub const HURT_DURATION: f32 = 1.0;
pub const INVINCIBILITY_DURATION: f32 = 1.8;
/// Without a new accepted move for this long, `Moving` settles back to `Idle`.
pub const MOVING_LINGER: f32 = 0.3;
/// Sword frames are 48px, centered on the 16px player tile.
pub const SWORD_DRAW_OFFSET: i32 = -16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Moving,
    Attacking,
    Hurt,
    Dying,
}

#[derive(Component, Debug, Clone)]
pub struct Player {
    pub state: PlayerState,
    pub facing: Facing,
    pub health: u32,
    pub max_health: u32,
    pub state_entered: f32,
    pub last_move: Option<f32>,
    pub invincible_until: f32,
    /// Weapon swing, independent from the body animation.
    pub sword: Animation,
    pub paused: bool,
}

impl Player {
    pub fn new(now: f32) -> Self {
        Self {
            state: PlayerState::Idle,
            facing: Facing::Right,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            state_entered: now,
            last_move: None,
            invincible_until: f32::NEG_INFINITY,
            sword: Animation::new(SWORD_SET),
            paused: false,
        }
    }

    /// Carry health over from the previous level.
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(self.max_health);
        self
    }

    fn is_busy(&self) -> bool {
        matches!(
            self.state,
            PlayerState::Attacking | PlayerState::Hurt | PlayerState::Dying
        )
    }

    fn enter(&mut self, state: PlayerState, now: f32) {
        self.state = state;
        self.state_entered = now;
    }

    /// Step one tile. The position is untouched on rejection.
    pub fn try_move(
        &mut self,
        pos: &mut MapPosition,
        dx: i32,
        dy: i32,
        now: f32,
        terrain: &dyn Terrain,
        body: &mut Animation,
    ) -> Result<(), Rejected> {
        if self.is_busy() {
            return Err(Rejected::Busy);
        }
        if let Some(last) = self.last_move {
            if now - last < MOVE_COOLDOWN {
                return Err(Rejected::Cooldown);
            }
        }
        let dest = pos.offset_tiles(dx.signum(), dy.signum());
        if !terrain.in_bounds(dest.x, dest.y, TILE_SIZE) {
            return Err(Rejected::OutOfBounds);
        }
        if terrain.is_blocked(dest.x, dest.y) {
            return Err(Rejected::Blocked);
        }
        *pos = dest;
        if let Some(facing) = Facing::from_dx(dx) {
            self.facing = facing;
        }
        self.last_move = Some(now);
        self.enter(PlayerState::Moving, now);
        body.play(&self.body_clip(), false);
        Ok(())
    }

    pub fn attack(&mut self, now: f32) -> Result<(), Rejected> {
        if self.is_busy() {
            return Err(Rejected::Busy);
        }
        self.enter(PlayerState::Attacking, now);
        self.sword
            .play(&format!("attack_{}", self.facing.as_str()), true);
        Ok(())
    }

    pub fn take_damage(&mut self, amount: u32, now: f32, body: &mut Animation) -> Result<Hit, Rejected> {
        if matches!(self.state, PlayerState::Hurt | PlayerState::Dying) {
            return Err(Rejected::Busy);
        }
        if self.is_invincible(now) {
            return Err(Rejected::Invincible);
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.enter(PlayerState::Dying, now);
            body.play(&format!("die_{}", self.facing.as_str()), true);
            Ok(Hit::Fatal)
        } else {
            self.enter(PlayerState::Hurt, now);
            self.invincible_until = now + INVINCIBILITY_DURATION;
            body.play(&format!("hurt_{}", self.facing.as_str()), true);
            Ok(Hit::Hurt)
        }
    }

    /// Restore health; `false` when already full.
    pub fn heal(&mut self, amount: u32) -> bool {
        if self.health >= self.max_health {
            return false;
        }
        self.health = (self.health + amount).min(self.max_health);
        true
    }

    /// Expire timed states and keep the body clip in sync with the state.
    pub fn update(&mut self, now: f32, dt: f32, body: &mut Animation, clips: &AnimationStore) {
        if self.paused {
            return;
        }
        match self.state {
            PlayerState::Attacking => {
                if let Some(clip) = clips.clip(SWORD_SET, &self.sword.clip) {
                    self.sword.update(dt, clip);
                }
                if now - self.state_entered >= ATTACK_DURATION {
                    self.enter(PlayerState::Idle, now);
                }
            }
            PlayerState::Hurt => {
                if now - self.state_entered >= HURT_DURATION {
                    self.enter(PlayerState::Idle, now);
                }
            }
            PlayerState::Moving => {
                let idle_for = self.last_move.map(|t| now - t).unwrap_or(MOVING_LINGER);
                if idle_for >= MOVING_LINGER {
                    self.enter(PlayerState::Idle, now);
                }
            }
            PlayerState::Idle | PlayerState::Dying => {}
        }
        if matches!(self.state, PlayerState::Idle | PlayerState::Moving) {
            body.play(&self.body_clip(), false);
        }
    }

    /// `walk_<facing>` while moving, `idle_<facing>` otherwise.
    pub fn body_clip(&self) -> String {
        let motion = if self.state == PlayerState::Moving {
            "walk"
        } else {
            "idle"
        };
        format!("{}_{}", motion, self.facing.as_str())
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn is_attacking(&self) -> bool {
        self.state == PlayerState::Attacking
    }

    pub fn is_invincible(&self, now: f32) -> bool {
        now < self.invincible_until
    }

    /// The single tile in front of the player.
    pub fn sword_rect(&self, pos: MapPosition) -> Rect {
        let tile = pos.offset_tiles(self.facing.dx(), 0);
        Rect::new(tile.x, tile.y, TILE_SIZE, TILE_SIZE)
    }

    pub fn animation_set() -> AnimationSet {
        AnimationSet::new("player", TILE_SIZE as u32)
            .with_clip("idle_right", AnimationClip::row(0, 0..3, 0.6, true))
            .with_clip("idle_left", AnimationClip::row(1, 0..3, 0.6, true))
            .with_clip("walk_right", AnimationClip::row(2, 0..4, 0.6, true))
            .with_clip("walk_left", AnimationClip::row(3, 0..4, 0.6, true))
            .with_clip("hurt_right", AnimationClip::row(4, 1..6, 0.6, false))
            .with_clip("hurt_left", AnimationClip::row(5, 1..6, 0.6, false))
            .with_clip("die_right", AnimationClip::row(6, 1..4, 0.6, false))
            .with_clip("die_left", AnimationClip::row(7, 1..4, 0.6, false))
    }

    pub fn sword_set() -> AnimationSet {
        AnimationSet::new("weapons_animated", 48)
            .with_clip("attack_left", AnimationClip::row(0, 0..5, 0.1, false))
            .with_clip("attack_right", AnimationClip::row(2, 0..5, 0.1, false))
    }
}

impl Behavior for Player {
    fn is_hurt_or_dying(&self) -> bool {
        matches!(self.state, PlayerState::Hurt | PlayerState::Dying)
    }

    /// The player leaves only with its level; death is handled by the screen flow.
    fn removal_eligible(&self, _now: f32) -> bool {
        false
    }

    fn visible_at(&self, now: f32) -> bool {
        if self.is_invincible(now) && !self.is_hurt_or_dying() {
            blink_visible(now, 10.0)
        } else {
            true
        }
    }
}

impl Pausable for Player {
    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        self.sword.set_paused(paused);
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::collisiongrid::CollisionGrid;

    fn open_grid() -> CollisionGrid {
        CollisionGrid::new(10, 10)
    }

    fn setup() -> (Player, MapPosition, Animation) {
        (
            Player::new(0.0),
            MapPosition::new(32, 32),
            Animation::playing(PLAYER_SET, "idle_right"),
        )
    }

    #[test]
    fn accepted_move_advances_one_tile_and_sets_facing() {
        let (mut p, mut pos, mut body) = setup();
        assert!(p.try_move(&mut pos, -1, 0, 1.0, &open_grid(), &mut body).is_ok());
        assert_eq!(pos, MapPosition::new(16, 32));
        assert_eq!(p.facing, Facing::Left);
        assert_eq!(p.state, PlayerState::Moving);
        assert_eq!(body.clip, "walk_left");
    }

    #[test]
    fn vertical_move_keeps_facing() {
        let (mut p, mut pos, mut body) = setup();
        p.try_move(&mut pos, 0, 1, 1.0, &open_grid(), &mut body).unwrap();
        assert_eq!(p.facing, Facing::Right);
        assert_eq!(pos, MapPosition::new(32, 48));
    }

    #[test]
    fn blocked_or_out_of_bounds_destination_is_rejected() {
        let (mut p, mut pos, mut body) = setup();
        let mut grid = open_grid();
        grid.set_blocked(3, 2, true);
        assert_eq!(
            p.try_move(&mut pos, 1, 0, 1.0, &grid, &mut body),
            Err(Rejected::Blocked)
        );
        assert_eq!(pos, MapPosition::new(32, 32));

        let mut edge = MapPosition::new(0, 0);
        assert_eq!(
            p.try_move(&mut edge, -1, 0, 1.0, &grid, &mut body),
            Err(Rejected::OutOfBounds)
        );
        assert_eq!(edge, MapPosition::new(0, 0));
        assert_eq!(p.state, PlayerState::Idle);
    }

    #[test]
    fn cooldown_gates_consecutive_moves() {
        let (mut p, mut pos, mut body) = setup();
        let grid = open_grid();
        p.try_move(&mut pos, 1, 0, 1.0, &grid, &mut body).unwrap();
        assert_eq!(
            p.try_move(&mut pos, 1, 0, 1.1, &grid, &mut body),
            Err(Rejected::Cooldown)
        );
        assert!(p.try_move(&mut pos, 1, 0, 1.2, &grid, &mut body).is_ok());
        assert_eq!(pos, MapPosition::new(64, 32));
    }

    #[test]
    fn attacking_blocks_moves_and_new_attacks_until_it_ends() {
        let (mut p, mut pos, mut body) = setup();
        let store = AnimationStore::new();
        p.attack(1.0).unwrap();
        assert_eq!(p.sword.clip, "attack_right");
        assert_eq!(p.attack(1.1), Err(Rejected::Busy));
        assert_eq!(
            p.try_move(&mut pos, 1, 0, 1.2, &open_grid(), &mut body),
            Err(Rejected::Busy)
        );
        p.update(1.5, 0.3, &mut body, &store);
        assert_eq!(p.state, PlayerState::Idle);
        assert!(p.attack(1.6).is_ok());
    }

    #[test]
    fn damage_hurts_then_invincibility_rejects_more() {
        let (mut p, _, mut body) = setup();
        let store = AnimationStore::new();
        assert_eq!(p.take_damage(1, 2.0, &mut body), Ok(Hit::Hurt));
        assert_eq!(p.health, 2);
        assert_eq!(body.clip, "hurt_right");
        assert_eq!(p.take_damage(1, 2.1, &mut body), Err(Rejected::Busy));
        p.update(3.0, 1.0, &mut body, &store);
        assert_eq!(p.state, PlayerState::Idle);
        assert_eq!(p.take_damage(1, 3.5, &mut body), Err(Rejected::Invincible));
        assert_eq!(p.health, 2);
        assert_eq!(p.take_damage(1, 3.9, &mut body), Ok(Hit::Hurt));
        assert_eq!(p.health, 1);
    }

    #[test]
    fn lethal_damage_clamps_at_zero_and_enters_dying() {
        let (mut p, _, mut body) = setup();
        assert_eq!(p.take_damage(5, 1.0, &mut body), Ok(Hit::Fatal));
        assert_eq!(p.health, 0);
        assert!(p.is_dead());
        assert_eq!(p.state, PlayerState::Dying);
        assert_eq!(body.clip, "die_right");
        assert_eq!(p.take_damage(1, 9.0, &mut body), Err(Rejected::Busy));
    }

    #[test]
    fn heal_caps_at_max() {
        let mut p = Player::new(0.0).with_health(2);
        assert!(p.heal(1));
        assert_eq!(p.health, 3);
        assert!(!p.heal(1));
    }

    #[test]
    fn moving_settles_to_idle_without_new_moves() {
        let (mut p, mut pos, mut body) = setup();
        let store = AnimationStore::new();
        p.try_move(&mut pos, 1, 0, 1.0, &open_grid(), &mut body).unwrap();
        p.update(1.1, 0.1, &mut body, &store);
        assert_eq!(body.clip, "walk_right");
        p.update(1.35, 0.25, &mut body, &store);
        assert_eq!(p.state, PlayerState::Idle);
        assert_eq!(body.clip, "idle_right");
    }

    #[test]
    fn sword_rect_is_the_tile_in_front() {
        let mut p = Player::new(0.0);
        assert_eq!(
            p.sword_rect(MapPosition::new(32, 16)),
            Rect::new(48, 16, 16, 16)
        );
        p.facing = Facing::Left;
        assert_eq!(
            p.sword_rect(MapPosition::new(32, 16)),
            Rect::new(16, 16, 16, 16)
        );
    }
}
