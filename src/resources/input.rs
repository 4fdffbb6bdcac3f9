//! Per-tick input resource.
//!
//! The backend exposes raw held/not-held signals through [`InputSource`].
//! Each tick [`InputState::sample`] turns them into [`BoolState`]s with press
//! and release edges. Discrete actions go through [`InputState::accept`],
//! which needs a fresh press and a per-action debounce window since the last
//! accepted one. Nothing here ever sleeps.
use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

use crate::components::facing::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Left,
    Right,
    Up,
    Down,
    Attack,
    Interact,
    Pause,
    Debug,
    Cancel,
    Advance,
    Quit,
}

impl InputAction {
    pub const ALL: [InputAction; 11] = [
        InputAction::Left,
        InputAction::Right,
        InputAction::Up,
        InputAction::Down,
        InputAction::Attack,
        InputAction::Interact,
        InputAction::Pause,
        InputAction::Debug,
        InputAction::Cancel,
        InputAction::Advance,
        InputAction::Quit,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Minimum seconds between two accepted activations.
    pub fn debounce_window(self) -> f32 {
        match self {
            InputAction::Attack => 0.1,
            InputAction::Quit => 0.0,
            _ => 0.2,
        }
    }
}

/// Raw boolean signals provided by the platform layer.
pub trait InputSource {
    fn is_down(&self, action: InputAction) -> bool;
}

/// A fixed set of held actions. Handy for scripted and headless runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldActions(FxHashSet<InputAction>);

impl HeldActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, action: InputAction) -> Self {
        self.0.insert(action);
        self
    }

    pub fn press(&mut self, action: InputAction) {
        self.0.insert(action);
    }

    pub fn release(&mut self, action: InputAction) {
        self.0.remove(&action);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl InputSource for HeldActions {
    fn is_down(&self, action: InputAction) -> bool {
        self.0.contains(&action)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
/// Boolean action state for the current tick.
pub struct BoolState {
    /// Whether the action is held this tick.
    pub active: bool,
    /// Whether it went down this tick.
    pub just_pressed: bool,
    /// Whether it went up this tick.
    pub just_released: bool,
    /// Time of the last accepted activation.
    pub last_accepted: Option<f32>,
}

/// Resource capturing the per-tick action state relevant to gameplay.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    states: [BoolState; 11],
}

impl InputState {
    /// Poll every action once and derive edges from the previous tick.
    pub fn sample(&mut self, source: &dyn InputSource) {
        for action in InputAction::ALL {
            let state = &mut self.states[action.index()];
            let down = source.is_down(action);
            state.just_pressed = down && !state.active;
            state.just_released = !down && state.active;
            state.active = down;
        }
    }

    pub fn get(&self, action: InputAction) -> &BoolState {
        &self.states[action.index()]
    }

    pub fn is_active(&self, action: InputAction) -> bool {
        self.get(action).active
    }

    /// Accept a discrete action: fresh press, outside its debounce window.
    pub fn accept(&mut self, action: InputAction, now: f32) -> bool {
        let state = &mut self.states[action.index()];
        if !state.just_pressed {
            return false;
        }
        if let Some(last) = state.last_accepted {
            if now - last < action.debounce_window() {
                return false;
            }
        }
        state.last_accepted = Some(now);
        true
    }

    /// First accepted action among `actions`.
    pub fn accept_any(&mut self, actions: &[InputAction], now: f32) -> bool {
        actions.iter().any(|a| self.accept(*a, now))
    }

    /// The held direction when exactly one is held.
    pub fn single_direction(&self) -> Option<Direction> {
        let held: Vec<Direction> = [
            (InputAction::Left, Direction::Left),
            (InputAction::Right, Direction::Right),
            (InputAction::Up, Direction::Up),
            (InputAction::Down, Direction::Down),
        ]
        .into_iter()
        .filter(|(action, _)| self.is_active(*action))
        .map(|(_, dir)| dir)
        .collect();
        match held.as_slice() {
            [dir] => Some(*dir),
            _ => None,
        }
    }
}
