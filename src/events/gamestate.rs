//! Screen change event and observer.
//!
//! Systems request a new screen by setting [`NextGameState`]. Emitting a
//! [`GameStateChangedEvent`] then triggers the observer in this module, which
//! applies the change to [`GameState`] and runs the enter hook stored in
//! [`SystemsStore`] under the screen's [`hook_name`](Screens::hook_name).
//!
//! This decouples the intent to change screen from the mechanics of running
//! setup systems and avoids borrowing conflicts.
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, NextGameState, Screens};
use crate::resources::systemsstore::SystemsStore;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Event used to indicate that a pending screen change should be applied.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending screen change.
///
/// - Reads the intention from [`NextGameState`].
/// - If pending, copies the new value into [`GameState`], clears the intent
///   and queues the new screen's enter hook.
/// - If any required resource is missing, logs a diagnostic and returns.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    systems_store: Res<SystemsStore>,
) {
    debug!("GameStateChangedEvent triggered");

    if let (Some(next_game_state), Some(game_state)) =
        (next_game_state.as_deref_mut(), game_state.as_deref_mut())
    {
        match *next_game_state.get() {
            Pending(new_state) => {
                info!("Transitioning from {:?} to {:?}", game_state.get(), new_state);
                game_state.set(new_state);
                next_game_state.reset();
                on_state_enter(new_state, &mut commands, &systems_store);
            }
            Unchanged => {
                debug!("No state change pending.");
            }
        }
    } else {
        warn!(
            "One or more resources missing in observe_gamestate_change_event. next_state: {:?}, game_state: {:?}",
            next_game_state.is_some(),
            game_state.is_some()
        );
    }
}

/// Internal: run the "enter" system registered for `state`.
fn on_state_enter(state: Screens, commands: &mut Commands, systems_store: &SystemsStore) {
    match systems_store.get(state.hook_name()) {
        Some(id) => commands.run_system(*id),
        None => warn!("No enter hook '{}' registered", state.hook_name()),
    }
}
