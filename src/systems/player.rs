//! Player systems.
//!
//! - [`player_input`] turns accepted actions into attack, door and movement
//!   requests on the [`Player`] machine.
//! - [`player_update`] expires its timed states.
//! - [`camera_follow`] keeps the view on the player.
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::animation::Animation;
use crate::components::behavior::Rejected;
use crate::components::boxcollider::BoxCollider;
use crate::components::door::Door;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::events::audio::AudioCmd;
use crate::resources::animationstore::AnimationStore;
use crate::resources::camera2d::Camera2D;
use crate::resources::collisiongrid::CollisionGrid;
use crate::resources::gameprogress::GameProgress;
use crate::resources::input::{InputAction, InputState};
use crate::resources::level::LevelState;
use crate::resources::worldtime::WorldTime;

/// Attack, door interaction and one-tile movement for the player.
#[allow(clippy::too_many_arguments)]
pub fn player_input(
    mut input: ResMut<InputState>,
    time: Res<WorldTime>,
    grid: Res<CollisionGrid>,
    mut level: ResMut<LevelState>,
    mut progress: ResMut<GameProgress>,
    mut players: Query<(&mut Player, &mut MapPosition, &mut Animation, &BoxCollider)>,
    doors: Query<&Door>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let now = time.elapsed;
    let Ok((mut player, mut pos, mut body, collider)) = players.single_mut() else {
        return;
    };

    if input.accept(InputAction::Attack, now) && player.attack(now).is_ok() {
        audio.write(AudioCmd::fx("sword_2"));
    }

    if input.accept(InputAction::Interact, now) {
        let rect = collider.rect_at(*pos);
        if let Some(door) = doors.iter().find(|d| d.rect.overlaps(&rect)) {
            if door.pass(&mut progress.has_key) {
                info!("Player entered door");
                audio.write(AudioCmd::fx("wings"));
                level.start_transition(now);
                return;
            }
            info!("Door is locked, a key is needed");
            audio.write(AudioCmd::fx("hit_7"));
        }
    }

    if let Some(dir) = input.single_direction() {
        let (dx, dy) = dir.delta();
        match player.try_move(&mut pos, dx, dy, now, &*grid, &mut body) {
            Ok(()) | Err(Rejected::Cooldown) => {}
            Err(reason) => debug!("Move {:?} rejected: {:?}", dir, reason),
        }
    }
}

pub fn player_update(
    time: Res<WorldTime>,
    store: Res<AnimationStore>,
    mut players: Query<(&mut Player, &mut Animation)>,
) {
    for (mut player, mut body) in players.iter_mut() {
        player.update(time.elapsed, time.delta, &mut body, &store);
    }
}

/// Center the view on the player, clamped to the level.
pub fn camera_follow(
    mut camera: ResMut<Camera2D>,
    grid: Res<CollisionGrid>,
    players: Query<&MapPosition, With<Player>>,
) {
    if let Ok(pos) = players.single() {
        let (w, h) = grid.pixel_size();
        camera.follow(pos.x + 8, pos.y + 8, w, h);
    }
}
