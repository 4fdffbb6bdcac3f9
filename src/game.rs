//! World setup and the per-frame tick.
//!
//! The binary and the integration tests build the same world:
//!
//! ```ignore
//! let mut world = setup_world(config, provider, catalog, highscore);
//! let mut schedule = build_schedule();
//! loop {
//!     tick(&mut world, &mut schedule, &input, dt, &mut draw_list);
//!     if quit_requested(&world) { break; }
//! }
//! ```
//!
//! Only the platform pieces differ: where input comes from, where frames go
//! and whether an audio thread is attached.
use bevy_ecs::message::Messages;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::animation::Animation;
use crate::components::boss::{BOSS_SET, Boss};
use crate::components::enemy::Enemy;
use crate::components::pickup::{PICKUP_SET, Pickup};
use crate::components::player::{PLAYER_SET, Player, SWORD_SET};
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::animationstore::AnimationStore;
use crate::resources::assetcatalog::AssetCatalog;
use crate::resources::camera2d::Camera2D;
use crate::resources::collisiongrid::CollisionGrid;
use crate::resources::debugmode::DebugMode;
use crate::resources::framecache::FrameCache;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gameprogress::GameProgress;
use crate::resources::gamestate::{GameState, NextGameState, Screens};
use crate::resources::highscore::HighScoreStore;
use crate::resources::input::{InputSource, InputState};
use crate::resources::level::LevelState;
use crate::resources::screenflow::ScreenFlow;
use crate::resources::systemsstore::SystemsStore;
use crate::resources::tilemap::{LevelSource, TileMapProvider};
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::{advance_level_clock, animation};
use crate::systems::audio::{
    forward_audio_cmds, has_audio_bridge, log_audio_messages, poll_audio_messages,
    update_bevy_audio_cmds, update_bevy_audio_messages,
};
use crate::systems::cleanup::{prune_collected_pickups, prune_removable};
use crate::systems::collision::resolve_collisions;
use crate::systems::enemy::{boss_pattern, enemy_patrol};
use crate::systems::gamestate::{check_pending_state, entities_are_running, world_is_running};
use crate::systems::input::poll_input;
use crate::systems::level::level_transition;
use crate::systems::pause::cascade_pause;
use crate::systems::player::{camera_follow, player_input, player_update};
use crate::systems::render::{HUD_SET, PresentationSink, hud_set, render_frame};
use crate::systems::screen::{
    enter_credits, enter_game, enter_game_over, enter_logo, enter_title, screen_input, screen_update,
};
use crate::systems::time::update_world_time;

/// Build a world ready for its first tick, sitting on the `Logo` screen.
pub fn setup_world(
    config: GameConfig,
    provider: impl TileMapProvider + 'static,
    catalog: AssetCatalog,
    highscore: HighScoreStore,
) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(InputState::default());
    world.insert_resource(Camera2D::new(
        config.render_width as i32,
        config.render_height as i32,
    ));
    world.insert_resource(LevelState::new(config.levels.clone()));
    world.insert_resource(CollisionGrid::default());
    world.insert_resource(GameProgress::with_high_score(highscore.load()));
    world.insert_resource(highscore);
    world.insert_resource(LevelSource::new(provider));

    let mut anim_store = AnimationStore::new();
    anim_store.insert(PLAYER_SET, Player::animation_set());
    anim_store.insert(SWORD_SET, Player::sword_set());
    anim_store.insert(BOSS_SET, Boss::animation_set());
    anim_store.insert(PICKUP_SET, Pickup::animation_set());
    anim_store.insert(HUD_SET, hud_set());
    world.insert_resource(anim_store);
    world.insert_resource(catalog);
    world.insert_resource(FrameCache::new());

    world.insert_resource(ScreenFlow::default());
    world.insert_resource(GameState::new(Screens::Logo));
    world.insert_resource(NextGameState::new());
    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Messages<AudioMessage>>();
    if config.start_debug {
        info!("Starting with debug overlays");
        world.insert_resource(DebugMode {});
    }
    world.insert_resource(config);

    world.spawn(Observer::new(observe_gamestate_change_event));
    world.spawn(Observer::new(switch_debug_observer));

    let mut systems_store = SystemsStore::new();
    systems_store.insert(Screens::Logo.hook_name(), world.register_system(enter_logo));
    systems_store.insert(Screens::Title.hook_name(), world.register_system(enter_title));
    systems_store.insert(Screens::Game.hook_name(), world.register_system(enter_game));
    systems_store.insert(
        Screens::GameOver.hook_name(),
        world.register_system(enter_game_over),
    );
    systems_store.insert(
        Screens::Credits.hook_name(),
        world.register_system(enter_credits),
    );
    world.insert_resource(systems_store);
    world.flush();

    world.resource_mut::<NextGameState>().set(Screens::Logo);
    world.trigger(GameStateChangedEvent {});
    world.flush();
    world
}

/// The update schedule: input, screen flow, entity updates, pruning, then level changes.
///
/// Everything is chained; the order is part of the game's rules.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            update_bevy_audio_cmds,
            (
                forward_audio_cmds,
                poll_audio_messages,
                update_bevy_audio_messages,
                log_audio_messages,
            )
                .chain()
                .run_if(has_audio_bridge),
            screen_input,
            player_input.run_if(entities_are_running),
            screen_update,
            check_pending_state,
            (
                cascade_pause::<Player>,
                cascade_pause::<Enemy>,
                cascade_pause::<Boss>,
                cascade_pause::<Pickup>,
                cascade_pause::<Animation>,
            )
                .chain(),
            advance_level_clock.run_if(world_is_running),
            (
                player_update,
                enemy_patrol,
                boss_pattern,
                animation,
                resolve_collisions,
                camera_follow,
                prune_removable::<Enemy>,
                prune_removable::<Boss>,
                prune_collected_pickups,
            )
                .chain()
                .run_if(entities_are_running),
            // last, so a freshly loaded level sits still until the next tick
            level_transition.run_if(world_is_running),
        )
            .chain(),
    );
    update
}

/// One frame: sample input, advance time, run the schedule, draw.
pub fn tick(
    world: &mut World,
    schedule: &mut Schedule,
    source: &dyn InputSource,
    dt: f32,
    sink: &mut dyn PresentationSink,
) {
    poll_input(world, source);
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
    render_frame(world, sink);
}

pub fn quit_requested(world: &World) -> bool {
    world
        .get_resource::<ScreenFlow>()
        .is_some_and(|flow| flow.quit_requested)
}
