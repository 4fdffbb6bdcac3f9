//! Patrol and boss movement systems.
use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::components::boss::Boss;
use crate::components::enemy::Enemy;
use crate::components::mapposition::MapPosition;
use crate::resources::collisiongrid::CollisionGrid;
use crate::resources::worldtime::WorldTime;

pub fn enemy_patrol(
    time: Res<WorldTime>,
    grid: Res<CollisionGrid>,
    mut enemies: Query<(&mut Enemy, &mut MapPosition, &mut Animation)>,
) {
    for (mut enemy, mut pos, mut anim) in enemies.iter_mut() {
        enemy.update(&mut pos, time.elapsed, &*grid, &mut anim);
    }
}

pub fn boss_pattern(
    time: Res<WorldTime>,
    grid: Res<CollisionGrid>,
    mut bosses: Query<(&mut Boss, &mut MapPosition, &mut Animation)>,
) {
    for (mut boss, mut pos, mut anim) in bosses.iter_mut() {
        boss.update(&mut pos, time.elapsed, &*grid, &mut anim);
    }
}
