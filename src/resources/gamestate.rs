//! Top-level screen state.
//!
//! [`GameState`] is authoritative; systems request a change by setting
//! [`NextGameState`]. The observer in [`crate::events::gamestate`] applies
//! it and runs the enter hook of the new screen.

use bevy_ecs::prelude::Resource;

/// Screens of the game, in the order a player meets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screens {
    #[default]
    Logo,
    Title,
    Game,
    GameOver,
    Credits,
}

impl Screens {
    /// Key of the enter hook in [`SystemsStore`](crate::resources::systemsstore::SystemsStore).
    pub fn hook_name(self) -> &'static str {
        match self {
            Screens::Logo => "enter_logo",
            Screens::Title => "enter_title",
            Screens::Game => "enter_game",
            Screens::GameOver => "enter_game_over",
            Screens::Credits => "enter_credits",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(Screens),
}

/// Authoritative current screen and the one before it.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    current: Screens,
    previous: Option<Screens>,
}

impl GameState {
    pub fn new(start: Screens) -> Self {
        GameState {
            current: start,
            previous: None,
        }
    }

    pub fn get(&self) -> Screens {
        self.current
    }

    pub fn previous(&self) -> Option<Screens> {
        self.previous
    }

    /// Switch immediately, remembering the old screen.
    pub fn set(&mut self, state: Screens) {
        self.previous = Some(self.current);
        self.current = state;
    }
}

/// Intent to change to a new screen.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &NextGameStates {
        &self.next
    }

    pub fn set(&mut self, state: Screens) {
        self.next = NextGameStates::Pending(state);
    }

    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}
