//! Screen flow systems.
//!
//! [`screen_input`] and [`screen_update`] drive the Logo → Title → Game →
//! GameOver/Credits machine. Screen changes always go through a fade: the
//! target lands in [`NextGameState`] once the fade is over, and the observer
//! in [`crate::events::gamestate`] runs the matching `enter_*` hook below.
use bevy_ecs::prelude::*;
use log::{error, info};

use crate::components::animation::Animation;
use crate::components::player::{Player, PlayerState};
use crate::events::audio::AudioCmd;
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::assetcatalog::AssetCatalog;
use crate::resources::gameprogress::GameProgress;
use crate::resources::gamestate::{GameState, NextGameState, Screens};
use crate::resources::highscore::HighScoreStore;
use crate::resources::input::{InputAction, InputState};
use crate::resources::level::LevelState;
use crate::resources::screenflow::{CreditsReel, LOGO_CUE_DELAY, LOGO_DURATION, ScreenFlow};
use crate::resources::worldtime::WorldTime;
use crate::systems::level::{despawn_level, load_level};

pub const TITLE_MUSIC: &str = "village";

/// Screen-level actions: quit, start, pause, debug, credits navigation.
///
/// Nothing but quit is read while a fade runs.
pub fn screen_input(
    mut commands: Commands,
    mut input: ResMut<InputState>,
    mut flow: ResMut<ScreenFlow>,
    state: Res<GameState>,
    time: Res<WorldTime>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let now = time.elapsed;
    if input.accept(InputAction::Quit, now) {
        flow.request_quit();
        return;
    }
    if flow.is_transitioning() {
        return;
    }
    let screen = state.get();
    if screen == Screens::Credits {
        if input.accept(InputAction::Cancel, now) {
            flow.start_transition(Screens::Title, now);
        } else if input.accept(InputAction::Advance, now) && !flow.credits.advance(now) {
            flow.start_transition(Screens::Title, now);
        }
        return;
    }
    if input.accept(InputAction::Cancel, now) {
        flow.request_quit();
        return;
    }
    match screen {
        Screens::Title => {
            if input.accept_any(
                &[InputAction::Pause, InputAction::Attack, InputAction::Interact],
                now,
            ) {
                info!("Starting game from title screen");
                audio.write(AudioCmd::fx("accept_2"));
                flow.start_transition(Screens::Game, now);
            }
        }
        Screens::Game => {
            if flow.is_frozen() {
                return;
            }
            if input.accept(InputAction::Pause, now) {
                flow.toggle_pause();
            }
            if input.accept(InputAction::Debug, now) {
                commands.trigger(SwitchDebugEvent {});
            }
        }
        Screens::GameOver => {
            if input.accept_any(&[InputAction::Attack, InputAction::Interact], now) {
                flow.start_transition(Screens::Title, now);
            }
        }
        Screens::Logo | Screens::Credits => {}
    }
}

/// Timers of the screen machine: fades, logo, credits, freeze and death.
pub fn screen_update(
    mut flow: ResMut<ScreenFlow>,
    mut next: ResMut<NextGameState>,
    state: Res<GameState>,
    time: Res<WorldTime>,
    players: Query<(&Player, &Animation)>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let now = time.elapsed;
    if let Some(target) = flow.finish_transition(now) {
        next.set(target);
        return;
    }
    if flow.is_transitioning() {
        return;
    }
    match state.get() {
        Screens::Logo => {
            let shown = now - flow.entered_at;
            if !flow.logo_cue_played && shown >= LOGO_CUE_DELAY {
                flow.logo_cue_played = true;
                audio.write(AudioCmd::fx("gold_2"));
            }
            if shown >= LOGO_DURATION {
                flow.start_transition(Screens::Title, now);
            }
        }
        Screens::Credits => {
            if !flow.credits.tick(now) {
                info!("Credits finished");
                flow.start_transition(Screens::Title, now);
            }
        }
        Screens::Game => {
            if flow.end_expired_freeze(now) {
                info!("Victory freeze ended");
                flow.start_transition(Screens::Credits, now);
                return;
            }
            if flow.world_paused() {
                return;
            }
            let dead = players.iter().any(|(player, body)| {
                player.is_dead() && player.state == PlayerState::Dying && body.finished
            });
            if dead {
                info!("Player died");
                flow.start_transition(Screens::GameOver, now);
            }
        }
        Screens::Title | Screens::GameOver => {}
    }
}

pub fn enter_logo(mut flow: ResMut<ScreenFlow>, time: Res<WorldTime>) {
    flow.entered_at = time.elapsed;
    flow.logo_cue_played = false;
}

pub fn enter_title(
    mut flow: ResMut<ScreenFlow>,
    time: Res<WorldTime>,
    mut audio: MessageWriter<AudioCmd>,
) {
    flow.entered_at = time.elapsed;
    flow.paused = false;
    audio.write(AudioCmd::StopMusic);
    audio.write(AudioCmd::music(TITLE_MUSIC, true));
}

/// Resume the running game, or start a fresh one when there is none to resume.
pub fn enter_game(world: &mut World) {
    let now = world.resource::<WorldTime>().elapsed;
    let player_alive = world
        .query::<&Player>()
        .iter(world)
        .next()
        .is_some_and(|p| !p.is_dead());
    let fresh = world.resource::<LevelState>().loaded.is_none()
        || world.resource::<ScreenFlow>().session_over
        || !player_alive;
    {
        let mut flow = world.resource_mut::<ScreenFlow>();
        flow.entered_at = now;
        flow.paused = false;
        flow.victory_freeze = None;
        flow.session_over = false;
    }
    if !fresh {
        info!("Resuming game");
        return;
    }

    info!("Starting new game");
    world.resource_mut::<GameProgress>().reset_for_new_game();
    {
        let mut level = world.resource_mut::<LevelState>();
        level.completed = false;
        level.transition_started = None;
        level.loaded = None;
        level.music = None;
    }
    despawn_level(world);
    if let Err(e) = load_level(world, 0) {
        error!("Could not load the first level: {}", e);
    }
}

pub fn enter_game_over(
    mut flow: ResMut<ScreenFlow>,
    mut progress: ResMut<GameProgress>,
    highscore: Res<HighScoreStore>,
    time: Res<WorldTime>,
) {
    flow.entered_at = time.elapsed;
    flow.paused = false;
    flow.session_over = true;
    if progress.record_high_score() {
        info!("New high score {}", progress.high_score);
        if let Err(e) = highscore.save(progress.high_score) {
            error!("{}", e);
        }
    }
}

pub fn enter_credits(
    mut flow: ResMut<ScreenFlow>,
    catalog: Res<AssetCatalog>,
    time: Res<WorldTime>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let now = time.elapsed;
    flow.entered_at = now;
    flow.paused = false;
    flow.session_over = true;
    flow.credits = CreditsReel::probe(&catalog, now);
    if flow.credits.is_done() {
        info!("No credit slides, back to title");
        flow.start_transition(Screens::Title, now);
    } else {
        audio.write(AudioCmd::music(TITLE_MUSIC, true));
    }
}
