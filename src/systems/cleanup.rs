//! Registry pruning.
//!
//! Creatures leave when their machine says so ([`Behavior::removal_eligible`]);
//! pickups leave once collected.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::behavior::Behavior;
use crate::components::pickup::Pickup;
use crate::resources::worldtime::WorldTime;

pub fn prune_removable<T: Component + Behavior>(
    mut commands: Commands,
    time: Res<WorldTime>,
    query: Query<(Entity, &T)>,
) {
    for (entity, behavior) in query.iter() {
        if behavior.removal_eligible(time.elapsed) {
            debug!("Removing {:?} ({})", entity, std::any::type_name::<T>());
            commands.entity(entity).despawn();
        }
    }
}

pub fn prune_collected_pickups(mut commands: Commands, query: Query<(Entity, &Pickup)>) {
    for (entity, pickup) in query.iter() {
        if pickup.collected {
            commands.entity(entity).despawn();
        }
    }
}
