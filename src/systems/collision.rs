//! Per-tick collision resolution.
//!
//! Runs after every machine has moved, so nobody sees a half-updated world.
//! Three checks in fixed priority, each stopping at its first hit:
//!
//! 1. player vs pickup: collect one uncollected pickup and apply its effect;
//! 2. player vs enemy or boss: one point of damage unless invincible;
//! 3. sword vs enemy or boss: only while attacking, one tile in front.
use bevy_ecs::prelude::*;
use log::{error, info};

use crate::components::animation::Animation;
use crate::components::behavior::{Behavior, Hit};
use crate::components::boss::{BOSS_DEFEAT_BONUS, BOSS_HIT_BONUS, Boss};
use crate::components::boxcollider::{BoxCollider, Rect};
use crate::components::enemy::Enemy;
use crate::components::mapposition::MapPosition;
use crate::components::pickup::{COIN_SCORE, Pickup, PickupKind};
use crate::components::player::Player;
use crate::events::audio::AudioCmd;
use crate::resources::gameprogress::GameProgress;
use crate::resources::highscore::HighScoreStore;
use crate::resources::screenflow::ScreenFlow;
use crate::resources::worldtime::WorldTime;

type PlayerQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Player, &'static MapPosition, &'static BoxCollider, &'static mut Animation),
    (Without<Enemy>, Without<Boss>),
>;
type EnemyQuery<'w, 's> =
    Query<'w, 's, (&'static mut Enemy, &'static MapPosition, &'static mut Animation), Without<Player>>;
type BossQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Boss, &'static MapPosition, &'static mut Animation),
    (Without<Player>, Without<Enemy>),
>;

#[allow(clippy::too_many_arguments)]
pub fn resolve_collisions(
    time: Res<WorldTime>,
    mut progress: ResMut<GameProgress>,
    mut flow: ResMut<ScreenFlow>,
    highscore: Res<HighScoreStore>,
    mut audio: MessageWriter<AudioCmd>,
    mut players: PlayerQuery,
    mut pickups: Query<(&mut Pickup, &MapPosition, &BoxCollider)>,
    mut enemies: EnemyQuery,
    mut bosses: BossQuery,
) {
    let now = time.elapsed;
    let Ok((mut player, ppos, pcollider, mut body)) = players.single_mut() else {
        return;
    };
    let player_rect = pcollider.rect_at(*ppos);

    // 1) pickups
    for (mut pickup, pos, collider) in pickups.iter_mut() {
        if !collider.rect_at(*pos).overlaps(&player_rect) || !pickup.collect() {
            continue;
        }
        match pickup.kind {
            PickupKind::Coin => {
                progress.add_score(COIN_SCORE);
                audio.write(AudioCmd::fx("gold_2"));
            }
            PickupKind::Heart => {
                if player.heal(1) {
                    audio.write(AudioCmd::fx("gold_2"));
                } else {
                    info!("Health already full");
                    audio.write(AudioCmd::fx("hit_7"));
                }
            }
            PickupKind::Key => {
                progress.has_key = true;
                audio.write(AudioCmd::fx("gold_2"));
            }
        }
        info!("Collected {:?}, score {}", pickup.kind, progress.score);
        break;
    }

    // 2) contact damage
    if !player.is_invincible(now) {
        let touching = enemies
            .iter()
            .any(|(e, pos, _)| !e.is_hurt_or_dying() && e.tile_rect(*pos).overlaps(&player_rect))
            || bosses
                .iter()
                .any(|(b, pos, _)| !b.is_hurt_or_dying() && b.tile_rect(*pos).overlaps(&player_rect));
        if touching {
            match player.take_damage(1, now, &mut body) {
                Ok(Hit::Fatal) => {
                    info!("Player died");
                    audio.write(AudioCmd::StopMusic);
                    audio.write(AudioCmd::fx("game_over"));
                }
                Ok(Hit::Hurt) => {
                    info!("Player hurt, health {}", player.health);
                    audio.write(AudioCmd::fx("hit_7"));
                }
                Err(_) => {}
            }
        }
    }

    // 3) sword
    if !player.is_attacking() {
        return;
    }
    let sword = player.sword_rect(*ppos);
    if strike_enemy(&mut enemies, &sword, now, &mut audio) {
        return;
    }
    strike_boss(&mut bosses, &sword, now, &mut progress, &mut flow, &highscore, &mut audio);
}

fn strike_enemy(
    enemies: &mut EnemyQuery,
    sword: &Rect,
    now: f32,
    audio: &mut MessageWriter<AudioCmd>,
) -> bool {
    for (mut enemy, pos, mut anim) in enemies.iter_mut() {
        if enemy.is_hurt_or_dying() || !enemy.tile_rect(*pos).overlaps(sword) {
            continue;
        }
        if let Ok(Hit::Fatal) = enemy.take_damage(now, &mut anim) {
            info!("Enemy '{}' defeated", enemy.kind);
            enemy.start_death(now);
            audio.write(AudioCmd::fx("hit_7"));
        }
        return true;
    }
    false
}

fn strike_boss(
    bosses: &mut BossQuery,
    sword: &Rect,
    now: f32,
    progress: &mut GameProgress,
    flow: &mut ScreenFlow,
    highscore: &HighScoreStore,
    audio: &mut MessageWriter<AudioCmd>,
) {
    for (mut boss, pos, mut anim) in bosses.iter_mut() {
        if boss.is_hurt_or_dying() || !boss.tile_rect(*pos).overlaps(sword) {
            continue;
        }
        match boss.take_damage(now, &mut anim) {
            Ok(Hit::Hurt) => {
                progress.add_score(BOSS_HIT_BONUS);
                audio.write(AudioCmd::fx("hit_7"));
                info!("Boss hit, {} health left", boss.health);
            }
            Ok(Hit::Fatal) => {
                progress.add_score(BOSS_HIT_BONUS);
                progress.add_score(BOSS_DEFEAT_BONUS);
                audio.write(AudioCmd::StopMusic);
                audio.write(AudioCmd::fx("winneris"));
                if progress.record_high_score() {
                    info!("New high score {}", progress.high_score);
                    if let Err(e) = highscore.save(progress.high_score) {
                        error!("{}", e);
                    }
                }
                info!("Boss defeated, final score {}", progress.score);
                flow.start_victory_freeze(now);
            }
            Err(_) => {}
        }
        return;
    }
}
