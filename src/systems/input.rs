//! Input polling.
//!
//! [`poll_input`] samples the platform's [`InputSource`] once per tick, before
//! the schedule runs, and writes the result into [`InputState`]. Screen and
//! player systems read that resource; nothing else talks to the platform.
use bevy_ecs::prelude::*;

use crate::resources::input::{InputSource, InputState};

/// Sample every action once from `source`.
pub fn poll_input(world: &mut World, source: &dyn InputSource) {
    world.resource_mut::<InputState>().sample(source);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::input::{HeldActions, InputAction};

    #[test]
    fn polling_records_edges() {
        let mut world = World::new();
        world.insert_resource(InputState::default());
        poll_input(&mut world, &HeldActions::new().with(InputAction::Left));
        let input = world.resource::<InputState>();
        assert!(input.is_active(InputAction::Left));
        assert!(input.get(InputAction::Left).just_pressed);
        assert!(!input.is_active(InputAction::Right));
    }
}
