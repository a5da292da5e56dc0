//! Gameplay system: collision rules and their state mutations.
//!
//! Intersections use the close hit box throughout. Each rule collects
//! hits first, then applies them, so no two pools are borrowed at
//! once. Returns true when the player's health reached zero this tick.

use honk_core::constants::*;
use honk_core::enums::SpriteKind;
use honk_core::events::AudioEvent;

use crate::pool::Pools;

/// Scene state the gameplay system mutates.
pub struct GameplayState<'a> {
    pub score: &'a mut u32,
    pub powerup_charges: &'a mut u32,
    pub slow_motion_ticks: &'a mut u32,
    pub audio_events: &'a mut Vec<AudioEvent>,
}

pub fn run(pools: &mut Pools, state: &mut GameplayState<'_>) -> bool {
    resolve_player_rockets(pools, state);
    collect_pickups(pools, state);
    resolve_enemy_rockets(pools, state)
}

const PLAYER_ROCKET_KINDS: [SpriteKind; 3] = [
    SpriteKind::PlayerRocket,
    SpriteKind::PlayerFireCracker,
    SpriteKind::PlayerRocketSeeking,
];

const ENEMY_ROCKET_KINDS: [SpriteKind; 4] = [
    SpriteKind::UfoBossRocket,
    SpriteKind::UfoBossRocketSeeking,
    SpriteKind::VehicleBossRocket,
    SpriteKind::UfoEnemyRocket,
];

/// Target kinds a player rocket can damage, checked in this order; a
/// rocket detonates on its first hit only.
const TARGET_KINDS: [SpriteKind; 4] = [
    SpriteKind::VehicleBoss,
    SpriteKind::UfoBoss,
    SpriteKind::UfoEnemy,
    SpriteKind::Vehicle,
];

fn resolve_player_rockets(pools: &mut Pools, state: &mut GameplayState<'_>) {
    // (rocket kind, rocket id, target kind, target id)
    let mut hits: Vec<(SpriteKind, u32, SpriteKind, u32)> = Vec::new();

    for rocket_kind in PLAYER_ROCKET_KINDS {
        for rocket in pools.get(rocket_kind).iter_active() {
            if rocket.is_blasting {
                continue;
            }
            let rocket_box = rocket.hit_box();
            'targets: for target_kind in TARGET_KINDS {
                for target in pools.get(target_kind).iter_active() {
                    let vulnerable = match target_kind {
                        SpriteKind::Vehicle => target.will_honk && !target.is_blasting,
                        _ => !target.is_dead(),
                    };
                    if vulnerable && rocket_box.intersects(&target.hit_box()) {
                        hits.push((rocket_kind, rocket.id, target_kind, target.id));
                        break 'targets;
                    }
                }
            }
        }
    }

    for (rocket_kind, rocket_id, target_kind, target_id) in hits {
        if let Some(rocket) = pools.get_mut(rocket_kind).get_mut(rocket_id) {
            if rocket.is_blasting {
                continue;
            }
            rocket.set_blast();
        }
        state.audio_events.push(AudioEvent::Blast { kind: rocket_kind });
        apply_rocket_damage(pools, target_kind, target_id, state);
    }
}

fn apply_rocket_damage(
    pools: &mut Pools,
    target_kind: SpriteKind,
    target_id: u32,
    state: &mut GameplayState<'_>,
) {
    let Some(target) = pools.get_mut(target_kind).get_mut(target_id) else {
        return;
    };

    match target_kind {
        SpriteKind::Vehicle => {
            // A second rocket in the same pass finds the vehicle
            // already blasting and scores nothing.
            if target.is_blasting {
                return;
            }
            target.is_blasting = true;
            target.will_honk = false;
            *state.score += SCORE_VEHICLE_BLAST;
            state.audio_events.push(AudioEvent::Blast {
                kind: SpriteKind::Vehicle,
            });
        }
        SpriteKind::UfoEnemy => {
            if target.is_dead() {
                return;
            }
            target.health -= BOSS_HIT_LOSS;
            if target.is_dead() {
                *state.score += SCORE_UFO_ENEMY_KILL;
                state.audio_events.push(AudioEvent::Blast {
                    kind: SpriteKind::UfoEnemy,
                });
            }
        }
        SpriteKind::UfoBoss | SpriteKind::VehicleBoss => {
            if target.is_dead() {
                return;
            }
            target.health -= BOSS_HIT_LOSS;
            if target.is_dead() {
                target.is_attacking = false;
                *state.score += SCORE_BOSS_KILL;
                *state.slow_motion_ticks = SLOW_MOTION_DELAY_TICKS;
                state
                    .audio_events
                    .push(AudioEvent::BossDead { kind: target_kind });
                log::info!("boss destroyed: {target_kind:?}");
            }
        }
        _ => {}
    }
}

/// Enemy rockets against the player. Returns true on player death.
fn resolve_enemy_rockets(pools: &mut Pools, state: &mut GameplayState<'_>) -> bool {
    let Some(player) = pools.player() else {
        return false;
    };
    let player_box = player.hit_box();

    let mut hit_count = 0u32;
    for rocket_kind in ENEMY_ROCKET_KINDS {
        let pool = pools.get_mut(rocket_kind);
        for rocket in pool.iter_active_mut() {
            if rocket.is_blasting {
                continue;
            }
            if rocket.hit_box().intersects(&player_box) {
                rocket.set_blast();
                hit_count += 1;
                state.audio_events.push(AudioEvent::PlayerHit);
            }
        }
    }

    if hit_count == 0 {
        return false;
    }

    let pool = pools.get_mut(SpriteKind::Player);
    let Some(player) = pool.get_mut(player.id) else {
        return false;
    };
    player.health -= PLAYER_HIT_LOSS * hit_count as f64;
    if player.is_dead() {
        state.audio_events.push(AudioEvent::GameOver);
        log::info!("player destroyed, game over");
        return true;
    }
    false
}

fn collect_pickups(pools: &mut Pools, state: &mut GameplayState<'_>) {
    let Some(player) = pools.player() else {
        return;
    };
    let player_box = player.hit_box();

    // Health pickups.
    let collected: Vec<u32> = pools
        .get(SpriteKind::HealthPickup)
        .iter_active()
        .filter(|p| p.hit_box().intersects(&player_box))
        .map(|p| p.id)
        .collect();
    if !collected.is_empty() {
        for id in &collected {
            pools.get_mut(SpriteKind::HealthPickup).release(*id);
            state.audio_events.push(AudioEvent::PickupCollected {
                kind: SpriteKind::HealthPickup,
            });
        }
        let gain = HEALTH_PICKUP_GAIN * collected.len() as f64;
        let pool = pools.get_mut(SpriteKind::Player);
        if let Some(p) = pool.get_mut(player.id) {
            p.health = (p.health + gain).min(PLAYER_MAX_HEALTH);
        }
    }

    // Power-ups refill the seeking rocket charges.
    let collected: Vec<u32> = pools
        .get(SpriteKind::PowerUpPickup)
        .iter_active()
        .filter(|p| p.hit_box().intersects(&player_box))
        .map(|p| p.id)
        .collect();
    for id in collected {
        pools.get_mut(SpriteKind::PowerUpPickup).release(id);
        *state.powerup_charges = POWER_UP_CHARGES;
        state.audio_events.push(AudioEvent::PickupCollected {
            kind: SpriteKind::PowerUpPickup,
        });
    }
}
