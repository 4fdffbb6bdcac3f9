use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, NextGameState, NextGameStates, Screens};
use crate::resources::level::LevelState;
use crate::resources::screenflow::ScreenFlow;
use bevy_ecs::prelude::*;

pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

/// The level simulation may advance: in game, no fade, not paused or frozen.
pub fn world_is_running(
    state: Res<GameState>,
    flow: Res<ScreenFlow>,
    level: Option<Res<LevelState>>,
) -> bool {
    state.get() == Screens::Game
        && !flow.is_transitioning()
        && !flow.world_paused()
        && level.is_some_and(|l| l.loaded.is_some())
}

/// Entity machines additionally stand still during a level transition.
pub fn entities_are_running(
    state: Res<GameState>,
    flow: Res<ScreenFlow>,
    level: Option<Res<LevelState>>,
) -> bool {
    state.get() == Screens::Game
        && !flow.is_transitioning()
        && !flow.world_paused()
        && level.is_some_and(|l| l.loaded.is_some() && !l.is_transitioning())
}
