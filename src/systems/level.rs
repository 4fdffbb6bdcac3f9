//! Level lifecycle.
//!
//! [`load_level`] replaces the level-owned part of the world with the level
//! at a sequence index. [`level_transition`] waits out the fade started by a
//! door and then loads the next level. A failed load leaves the world as it
//! was.
use std::sync::Arc;

use bevy_ecs::prelude::*;
use log::{error, info, warn};

use crate::components::animatedtile::AnimatedTile;
use crate::components::animation::Animation;
use crate::components::boss::{BOSS_SET, BOSS_SIZE, Boss};
use crate::components::boxcollider::{BoxCollider, Rect};
use crate::components::door::Door;
use crate::components::enemy::{
    DEFAULT_ENEMY_HEALTH, DEFAULT_ENEMY_KIND, DEFAULT_PATROL_BLOCKS, Enemy, PatrolAxis,
};
use crate::components::levelentity::LevelEntity;
use crate::components::mapposition::{MapPosition, TILE_SIZE};
use crate::components::pickup::{PICKUP_SET, Pickup, PickupKind};
use crate::components::player::{PLAYER_SET, Player};
use crate::events::audio::AudioCmd;
use crate::resources::animationstore::AnimationStore;
use crate::resources::assetcatalog::AssetCatalog;
use crate::resources::camera2d::Camera2D;
use crate::resources::collisiongrid::CollisionGrid;
use crate::resources::gameprogress::GameProgress;
use crate::resources::level::LevelState;
use crate::resources::tilemap::{
    BACKGROUND_LAYER, COLLIDERS_LAYER, LevelData, LevelLoadError, LevelSource, MapObject,
    Tileposition,
};
use crate::resources::worldtime::WorldTime;

/// Remove every entity owned by the current level.
pub fn despawn_level(world: &mut World) {
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<LevelEntity>>()
        .iter(world)
        .collect();
    for entity in entities {
        world.despawn(entity);
    }
}

/// Load the level at `index` of the sequence.
///
/// The previous player's health carries over when a player exists. Errors are
/// returned before anything in the world is touched.
pub fn load_level(world: &mut World, index: usize) -> Result<(), LevelLoadError> {
    let level_id = world
        .resource::<LevelState>()
        .level_id(index)
        .map(str::to_string)
        .ok_or_else(|| LevelLoadError::Unknown(format!("#{}", index)))?;
    let data = world.resource::<LevelSource>().load(&level_id)?;

    if data.tile_size as i32 != TILE_SIZE {
        warn!(
            "Level '{}' uses {}px tiles, the game runs on {}px",
            level_id, data.tile_size, TILE_SIZE
        );
    }

    let carried_health = world
        .query::<&Player>()
        .iter(world)
        .next()
        .map(|p| p.health);
    despawn_level(world);

    let colliders = data
        .layer(COLLIDERS_LAYER)
        .map(|l| l.positions.as_slice())
        .unwrap_or_else(|| {
            warn!("Level '{}' has no '{}' layer", level_id, COLLIDERS_LAYER);
            &[]
        });
    let grid = CollisionGrid::from_layer(data.map_width as usize, data.map_height as usize, colliders);
    world.insert_resource(grid);

    let now = world.resource::<WorldTime>().elapsed;
    let music = spawn_objects(world, &data, now, carried_health);
    spawn_animated_tiles(world, &data);

    world.resource_mut::<Camera2D>().reset();
    world.resource_mut::<GameProgress>().level_index = index;
    {
        let mut level = world.resource_mut::<LevelState>();
        level.loaded = Some(level_id.clone());
        level.tileset = Arc::from(data.tileset.as_str());
        level.tile_size = data.tile_size;
        level.background = background_tiles(&data);
        level.transition_started = None;
        level.clock = 0.0;
        if music.is_some() {
            level.music = music;
        }
    }

    info!(
        "Loaded level '{}' ({}x{} tiles, {} objects)",
        level_id,
        data.map_width,
        data.map_height,
        data.objects.len()
    );
    Ok(())
}

/// Background then colliders, empty cells dropped.
fn background_tiles(data: &LevelData) -> Vec<Tileposition> {
    [BACKGROUND_LAYER, COLLIDERS_LAYER]
        .iter()
        .filter_map(|name| data.layer(name))
        .flat_map(|layer| layer.positions.iter())
        .filter(|t| t.id != 0)
        .cloned()
        .collect()
}

/// Spawn one entity per recognized object. Returns the music cue, if any.
fn spawn_objects(
    world: &mut World,
    data: &LevelData,
    now: f32,
    carried_health: Option<u32>,
) -> Option<String> {
    let mut music = None;
    let mut has_player = false;
    for obj in &data.objects {
        let pos = MapPosition::snapped(obj.x, obj.y);
        match obj.name.to_ascii_lowercase().as_str() {
            "player" => {
                if has_player {
                    warn!("Extra player object at ({}, {}) ignored", obj.x, obj.y);
                    continue;
                }
                has_player = true;
                let mut player = Player::new(now);
                if let Some(health) = carried_health {
                    player = player.with_health(health);
                }
                world.spawn((
                    player,
                    pos,
                    Animation::playing(PLAYER_SET, "idle_right"),
                    BoxCollider::default(),
                    LevelEntity,
                ));
            }
            "enemy" => spawn_enemy(world, obj, pos, now),
            "boss" => {
                world.spawn((
                    Boss::new(now),
                    pos,
                    Animation::playing(BOSS_SET, "walk_right"),
                    BoxCollider::square(BOSS_SIZE),
                    LevelEntity,
                ));
            }
            "door" => {
                let locked = obj.bool_prop("locked").unwrap_or(true);
                let rect = Rect::new(
                    obj.x.round() as i32,
                    obj.y.round() as i32,
                    obj.width.round() as i32,
                    obj.height.round() as i32,
                );
                world.spawn((Door::new(rect, locked), pos, LevelEntity));
            }
            "pickup" => {
                let kind = match obj.str_prop("pickup_type") {
                    None => PickupKind::default(),
                    Some(raw) => PickupKind::parse(raw).unwrap_or_else(|| {
                        warn!("Unknown pickup type '{}', using heart", raw);
                        PickupKind::default()
                    }),
                };
                world.spawn((
                    Pickup::new(kind),
                    pos,
                    Animation::playing(PICKUP_SET, kind.clip()),
                    BoxCollider::default(),
                    LevelEntity,
                ));
            }
            "info" => {
                if let Some(track) = obj.str_prop("music") {
                    music = cue_music(world, track);
                }
            }
            other => warn!("Unknown object '{}' at ({}, {})", other, obj.x, obj.y),
        }
    }
    if !has_player {
        warn!("Level has no player object");
    }
    music
}

fn spawn_enemy(world: &mut World, obj: &MapObject, pos: MapPosition, now: f32) {
    let kind = obj.str_prop("enemy_type").unwrap_or(DEFAULT_ENEMY_KIND).to_string();
    let axis = match obj.str_prop("enemy_movement") {
        None => PatrolAxis::Horizontal,
        Some(raw) => PatrolAxis::parse(raw).unwrap_or_else(|| {
            warn!("Unknown enemy movement '{}', using horizontal", raw);
            PatrolAxis::Horizontal
        }),
    };
    let blocks = obj.uint_prop("blocks").unwrap_or(DEFAULT_PATROL_BLOCKS);
    let health = obj.uint_prop("health").unwrap_or(DEFAULT_ENEMY_HEALTH);

    let enemy = Enemy::new(kind.as_str(), axis, blocks, now).with_health(health);
    let set_key = enemy.set_key();
    {
        let mut store = world.resource_mut::<AnimationStore>();
        if !store.contains(&set_key) {
            store.insert(set_key.clone(), Enemy::animation_set(&kind));
        }
    }
    world.spawn((
        enemy,
        pos,
        Animation::playing(set_key, "walk_right"),
        BoxCollider::default(),
        LevelEntity,
    ));
}

/// Switch to `track` if the platform has it.
fn cue_music(world: &mut World, track: &str) -> Option<String> {
    if !world.resource::<AssetCatalog>().has_music(track) {
        warn!("Level music '{}' is not available", track);
        return None;
    }
    let mut msgs = world.resource_mut::<Messages<AudioCmd>>();
    msgs.write(AudioCmd::StopMusic);
    msgs.write(AudioCmd::music(track, true));
    Some(track.to_string())
}

/// Only tiles with more than one frame animate.
fn spawn_animated_tiles(world: &mut World, data: &LevelData) {
    let ts = data.tile_size as i32;
    for def in &data.animated {
        if def.frames.len() < 2 {
            continue;
        }
        let frames = def.frames.iter().map(|f| (f.id, f.duration)).collect();
        world.spawn((
            AnimatedTile::new(frames),
            MapPosition::new(def.x as i32 * ts, def.y as i32 * ts),
            LevelEntity,
        ));
    }
}

/// Finish a level transition once its fade is over.
///
/// Past the last level the index stays put and the sequence is marked
/// complete.
pub fn level_transition(world: &mut World) {
    let now = world.resource::<WorldTime>().elapsed;
    if !world.resource::<LevelState>().transition_done(now) {
        return;
    }
    let current = world.resource::<GameProgress>().level_index;
    if world.resource::<LevelState>().is_last(current) {
        let mut level = world.resource_mut::<LevelState>();
        level.transition_started = None;
        level.completed = true;
        info!("All levels completed");
        return;
    }
    if let Err(e) = load_level(world, current + 1) {
        error!("Level load failed: {}", e);
        world.resource_mut::<LevelState>().transition_started = None;
    }
}
