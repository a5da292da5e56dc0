//! Spawn system: steps the generator table and honors fired requests.
//!
//! A fired generator is only a request. This system applies the gates
//! on top: pool capacity (exhaustion skips silently), boss presence,
//! and the score-ratcheted difficulty thresholds for bosses and enemy
//! waves.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use honk_core::constants::*;
use honk_core::enums::{MovementDirection, SpriteKind};
use honk_core::events::AudioEvent;
use honk_core::sprite::Sprite;
use honk_core::types::SceneBounds;

use crate::generator::Generator;
use crate::pool::Pools;
use crate::scene_setup;
use crate::threshold::Difficulty;

/// Scene state the spawn system reads and mutates.
pub struct SpawnState<'a> {
    pub difficulty: &'a mut Difficulty,
    pub score: u32,
    pub slow_motion_ticks: &'a mut u32,
    pub boss_max_health: &'a mut f64,
    pub audio_events: &'a mut Vec<AudioEvent>,
}

pub fn run(
    pools: &mut Pools,
    generators: &mut [Generator],
    rng: &mut ChaCha8Rng,
    bounds: &SceneBounds,
    state: &mut SpawnState<'_>,
) {
    arm_enemy_wave(state);

    for i in 0..generators.len() {
        if generators[i].step(rng) {
            let kind = generators[i].kind;
            dispatch(kind, pools, rng, bounds, state);
        }
    }
}

/// Crossing the enemy threshold arms a wave; the UFO enemy generator
/// draws the wave down one enemy per firing.
fn arm_enemy_wave(state: &mut SpawnState<'_>) {
    let score = state.score as f64;
    if state.difficulty.ufo_enemy.should_release(score) {
        state.difficulty.ufo_enemy.increase(score);
        state.difficulty.ufo_enemies_remaining += UFO_ENEMY_WAVE_SIZE;
        log::info!("ufo enemy wave armed at score {score}");
    }
}

fn dispatch(
    kind: SpriteKind,
    pools: &mut Pools,
    rng: &mut ChaCha8Rng,
    bounds: &SceneBounds,
    state: &mut SpawnState<'_>,
) {
    match kind {
        SpriteKind::Vehicle => spawn_vehicle(pools, rng, bounds),
        SpriteKind::RoadMark
        | SpriteKind::RoadSideTree
        | SpriteKind::RoadSideHedge
        | SpriteKind::RoadSideLamp
        | SpriteKind::RoadSideBillboard
        | SpriteKind::Cloud => spawn_ambient(kind, pools, rng, bounds),
        SpriteKind::VehicleBoss | SpriteKind::UfoBoss => {
            spawn_boss(kind, pools, rng, bounds, state)
        }
        SpriteKind::VehicleBossRocket => {
            spawn_boss_rocket(SpriteKind::VehicleBoss, kind, pools, rng, state)
        }
        SpriteKind::UfoBossRocket => {
            spawn_boss_rocket(SpriteKind::UfoBoss, kind, pools, rng, state)
        }
        SpriteKind::UfoBossRocketSeeking => spawn_boss_seeking_rocket(pools, rng, state),
        SpriteKind::UfoEnemy => spawn_ufo_enemy(pools, rng, bounds, state),
        SpriteKind::UfoEnemyRocket => spawn_enemy_rocket(pools, rng, state),
        SpriteKind::HealthPickup => spawn_health_pickup(pools, rng, bounds),
        SpriteKind::PowerUpPickup => spawn_power_up(pools, rng, bounds, state),
        _ => {}
    }
}

/// Vehicles pause while a boss holds the road.
fn spawn_vehicle(pools: &mut Pools, rng: &mut ChaCha8Rng, bounds: &SceneBounds) {
    if boss_active(pools) {
        return;
    }
    spawn_ambient(SpriteKind::Vehicle, pools, rng, bounds);
}

fn spawn_ambient(kind: SpriteKind, pools: &mut Pools, rng: &mut ChaCha8Rng, bounds: &SceneBounds) {
    let pool = pools.get_mut(kind);
    // Position needs the rng after acquire; split the steps.
    let id = match pool.acquire(rng) {
        Some(sprite) => sprite.id,
        None => return,
    };
    let size = pool.get(id).map(|s| s.size).unwrap_or_default();
    let position = scene_setup::entry_position(kind, size, rng, bounds);
    if let Some(sprite) = pool.get_mut(id) {
        sprite.position = position;
    }
}

/// Release a boss once its threshold opens and no other boss is on
/// scene. Health scales with the score gap since the previous release.
fn spawn_boss(
    kind: SpriteKind,
    pools: &mut Pools,
    rng: &mut ChaCha8Rng,
    bounds: &SceneBounds,
    state: &mut SpawnState<'_>,
) {
    let score = state.score as f64;
    let threshold = match kind {
        SpriteKind::VehicleBoss => &mut state.difficulty.vehicle_boss,
        _ => &mut state.difficulty.ufo_boss,
    };
    if !threshold.should_release(score) || boss_active(pools) {
        return;
    }

    let health = threshold.release_point_difference(score) * BOSS_HEALTH_SCALE;
    let boss_id = {
        let pool = pools.get_mut(kind);
        let Some(sprite) = pool.acquire(rng) else {
            return;
        };
        sprite.health = health;
        let id = sprite.id;
        let size = sprite.size;
        let (pattern, delay) = honk_boss_ai::fsm::random_pattern(kind, rng);
        let position = scene_setup::entry_position(kind, size, rng, bounds);
        if let Some(sprite) = pool.get_mut(id) {
            sprite.movement_pattern = pattern;
            sprite.pattern_change_delay = delay;
            sprite.position = position;
        }
        id
    };
    threshold.increase(score);

    scene_setup::attach_drop_shadow(pools, rng, boss_id);
    *state.slow_motion_ticks = SLOW_MOTION_DELAY_TICKS;
    *state.boss_max_health = health;
    state.audio_events.push(AudioEvent::BossEntry { kind });
    log::info!("boss released: {kind:?} with health {health:.1}");
}

/// A boss shoots only while attacking and alive.
fn spawn_boss_rocket(
    boss_kind: SpriteKind,
    rocket_kind: SpriteKind,
    pools: &mut Pools,
    rng: &mut ChaCha8Rng,
    state: &mut SpawnState<'_>,
) {
    let Some(boss) = attacking_boss(pools, boss_kind) else {
        return;
    };
    let Some(player) = pools.player() else {
        return;
    };

    let direction = aim_direction(boss.hit_box().center(), player.hit_box().center());
    let origin = boss.hit_box().center();
    let pool = pools.get_mut(rocket_kind);
    if let Some(rocket) = pool.acquire(rng) {
        rocket.position = origin - rocket.size * 0.5;
        rocket.movement_direction = direction;
        state
            .audio_events
            .push(AudioEvent::RocketLaunch { kind: rocket_kind });
    }
}

/// The UFO boss's homing shot carries the player's id as its target.
fn spawn_boss_seeking_rocket(pools: &mut Pools, rng: &mut ChaCha8Rng, state: &mut SpawnState<'_>) {
    let Some(boss) = attacking_boss(pools, SpriteKind::UfoBoss) else {
        return;
    };
    let Some(player) = pools.player() else {
        return;
    };

    let origin = boss.hit_box().center();
    let pool = pools.get_mut(SpriteKind::UfoBossRocketSeeking);
    if let Some(rocket) = pool.acquire(rng) {
        rocket.position = origin - rocket.size * 0.5;
        rocket.seek_target = Some(player.id);
        state.audio_events.push(AudioEvent::RocketLaunch {
            kind: SpriteKind::UfoBossRocketSeeking,
        });
    }
}

fn spawn_ufo_enemy(
    pools: &mut Pools,
    rng: &mut ChaCha8Rng,
    bounds: &SceneBounds,
    state: &mut SpawnState<'_>,
) {
    if state.difficulty.ufo_enemies_remaining == 0 {
        return;
    }
    let pool = pools.get_mut(SpriteKind::UfoEnemy);
    let id = match pool.acquire(rng) {
        Some(sprite) => sprite.id,
        None => return,
    };
    state.difficulty.ufo_enemies_remaining -= 1;
    let size = pool.get(id).map(|s| s.size).unwrap_or_default();
    let position = scene_setup::entry_position(SpriteKind::UfoEnemy, size, rng, bounds);
    if let Some(sprite) = pool.get_mut(id) {
        sprite.position = position;
    }
}

/// A random live enemy fires straight at the player's quadrant.
fn spawn_enemy_rocket(pools: &mut Pools, rng: &mut ChaCha8Rng, state: &mut SpawnState<'_>) {
    let shooters: Vec<Sprite> = pools
        .get(SpriteKind::UfoEnemy)
        .iter_active()
        .filter(|e| !e.is_dead())
        .cloned()
        .collect();
    if shooters.is_empty() {
        return;
    }
    let Some(player) = pools.player() else {
        return;
    };

    let shooter = &shooters[rng.gen_range(0..shooters.len())];
    let direction = aim_direction(shooter.hit_box().center(), player.hit_box().center());
    let origin = DVec2::new(shooter.hit_box().center().x, shooter.bottom());
    let pool = pools.get_mut(SpriteKind::UfoEnemyRocket);
    if let Some(rocket) = pool.acquire(rng) {
        rocket.position = origin - DVec2::new(rocket.size.x * 0.5, 0.0);
        rocket.movement_direction = direction;
        state.audio_events.push(AudioEvent::RocketLaunch {
            kind: SpriteKind::UfoEnemyRocket,
        });
    }
}

/// Health drops only appear while the player is hurt.
fn spawn_health_pickup(pools: &mut Pools, rng: &mut ChaCha8Rng, bounds: &SceneBounds) {
    let needs_health = pools
        .player()
        .map(|p| p.health <= PLAYER_MAX_HEALTH - HEALTH_PICKUP_GAIN)
        .unwrap_or(false);
    if needs_health {
        spawn_ambient(SpriteKind::HealthPickup, pools, rng, bounds);
    }
}

/// Power-ups only matter during the UFO phases of a session.
fn spawn_power_up(
    pools: &mut Pools,
    rng: &mut ChaCha8Rng,
    bounds: &SceneBounds,
    state: &mut SpawnState<'_>,
) {
    let ufo_phase = pools.get(SpriteKind::UfoBoss).has_active()
        || pools.get(SpriteKind::UfoEnemy).has_active()
        || state.difficulty.ufo_enemies_remaining > 0;
    if ufo_phase {
        spawn_ambient(SpriteKind::PowerUpPickup, pools, rng, bounds);
    }
}

fn boss_active(pools: &Pools) -> bool {
    pools.get(SpriteKind::UfoBoss).has_active() || pools.get(SpriteKind::VehicleBoss).has_active()
}

fn attacking_boss(pools: &Pools, kind: SpriteKind) -> Option<Sprite> {
    pools
        .get(kind)
        .iter_active()
        .find(|b| b.is_attacking && !b.is_dead())
        .cloned()
}

/// Quadrant aim: one of the 8 movement directions from `from` toward
/// `to`, preferring a diagonal unless one axis clearly dominates.
pub fn aim_direction(from: DVec2, to: DVec2) -> MovementDirection {
    let d = to - from;
    let east = d.x >= 0.0;
    let south = d.y >= 0.0;

    if d.x.abs() < d.y.abs() * 0.5 {
        if south {
            MovementDirection::Down
        } else {
            MovementDirection::Up
        }
    } else if d.y.abs() < d.x.abs() * 0.5 {
        if east {
            MovementDirection::Right
        } else {
            MovementDirection::Left
        }
    } else {
        match (east, south) {
            (true, true) => MovementDirection::DownRight,
            (true, false) => MovementDirection::UpRight,
            (false, true) => MovementDirection::DownLeft,
            (false, false) => MovementDirection::UpLeft,
        }
    }
}
