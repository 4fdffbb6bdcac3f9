//! Pause cascade.
//!
//! Every [`Pausable`] in the world follows
//! [`ScreenFlow::world_paused`](crate::resources::screenflow::ScreenFlow::world_paused):
//! the explicit pause toggle or the victory freeze.
use bevy_ecs::component::Mutable;
use bevy_ecs::prelude::*;

use crate::components::behavior::Pausable;
use crate::resources::screenflow::ScreenFlow;

pub fn cascade_pause<T>(flow: Res<ScreenFlow>, mut query: Query<&mut T>)
where
    T: Component<Mutability = Mutable> + Pausable,
{
    let paused = flow.world_paused();
    for mut item in query.iter_mut() {
        if item.is_paused() != paused {
            item.set_paused(paused);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::Animation;
    use crate::components::enemy::{Enemy, PatrolAxis};

    #[test]
    fn freeze_pauses_everything_and_release_resumes() {
        let mut world = World::new();
        world.insert_resource(ScreenFlow::default());
        let e = world
            .spawn((
                Enemy::new("rat", PatrolAxis::Horizontal, 2, 0.0),
                Animation::playing("enemy_rat", "walk_right"),
            ))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems((cascade_pause::<Enemy>, cascade_pause::<Animation>));

        world.resource_mut::<ScreenFlow>().start_victory_freeze(1.0);
        schedule.run(&mut world);
        assert!(world.get::<Enemy>(e).unwrap().is_paused());
        assert!(world.get::<Animation>(e).unwrap().is_paused());

        world.resource_mut::<ScreenFlow>().end_expired_freeze(5.0);
        schedule.run(&mut world);
        assert!(!world.get::<Enemy>(e).unwrap().is_paused());
        assert!(!world.get::<Animation>(e).unwrap().is_paused());
    }
}
