//! Movement system: advances every active sprite one tick.
//!
//! Road-bound sprites drift bottom-right with the scene; the vertical
//! component is the isometric fraction of the horizontal one. Player
//! input is consumed here exactly once per tick, including the attack
//! request. Boss displacement comes from the boss AI crate; this
//! system only applies it.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use honk_boss_ai::fsm::{self, BossContext};
use honk_boss_ai::profiles::get_profile;
use honk_core::constants::*;
use honk_core::enums::{MovementDirection, SpriteKind};
use honk_core::events::AudioEvent;
use honk_core::types::SceneBounds;

use crate::pool::Pools;
use crate::systems::spawn::aim_direction;

/// Player input consumed once per tick, then cleared.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    /// Analog movement, each axis in [-1, 1].
    pub movement: DVec2,
    pub attack: bool,
}

/// Scene state the movement system reads and mutates.
pub struct MoveState<'a> {
    pub input: &'a mut InputState,
    pub powerup_charges: &'a mut u32,
    pub audio_events: &'a mut Vec<AudioEvent>,
    /// Unscaled global scene speed.
    pub scene_speed: f64,
    /// 1.0 normally, reduced while slow motion is active.
    pub slow_factor: f64,
}

/// Kinds that drift bottom-right with the road each tick.
const DRIFT_KINDS: [SpriteKind; 9] = [
    SpriteKind::Vehicle,
    SpriteKind::RoadMark,
    SpriteKind::RoadSideTree,
    SpriteKind::RoadSideHedge,
    SpriteKind::RoadSideLamp,
    SpriteKind::RoadSideBillboard,
    SpriteKind::Cloud,
    SpriteKind::HealthPickup,
    SpriteKind::PowerUpPickup,
];

pub fn run(
    pools: &mut Pools,
    rng: &mut ChaCha8Rng,
    bounds: &SceneBounds,
    state: &mut MoveState<'_>,
) {
    update_player(pools, rng, bounds, state);
    drift_road_sprites(pools, state);
    prevent_vehicle_overlap(pools);
    update_vehicle_honks(pools, rng, state);
    update_honks(pools, state);
    update_rockets(pools, state);
    update_seeking_rockets(pools, state);
    update_ufo_enemies(pools, state);
    update_bosses(pools, rng, bounds, state);
    sync_drop_shadows(pools);
}

/// Consume movement input, clamp to the scene, and fire if requested.
fn update_player(
    pools: &mut Pools,
    rng: &mut ChaCha8Rng,
    bounds: &SceneBounds,
    state: &mut MoveState<'_>,
) {
    let input = *state.input;
    *state.input = InputState::default();

    {
        let pool = pools.get_mut(SpriteKind::Player);
        let Some(player) = pool.iter_active_mut().next() else {
            return;
        };
        let step = PLAYER_MOVE_SPEED * state.slow_factor;
        player.position += DVec2::new(
            input.movement.x.clamp(-1.0, 1.0) * step,
            input.movement.y.clamp(-1.0, 1.0) * step,
        );
        player.position.x = player.position.x.clamp(0.0, bounds.width - player.size.x);
        player.position.y = player.position.y.clamp(0.0, bounds.height - player.size.y);
    }

    if input.attack {
        fire_player_weapon(pools, rng, state);
    }
}

/// Weapon choice depends on what is on scene: firecrackers against the
/// road boss, seeking rockets while charges last against UFO targets,
/// plain rockets otherwise.
fn fire_player_weapon(pools: &mut Pools, rng: &mut ChaCha8Rng, state: &mut MoveState<'_>) {
    let Some(player) = pools.player() else {
        return;
    };
    let origin = player.hit_box().center();

    let vehicle_boss_active = pools
        .get(SpriteKind::VehicleBoss)
        .iter_active()
        .any(|b| !b.is_dead());
    let ufo_target = nearest_ufo_target(pools, origin);

    let (kind, seek_target) = if vehicle_boss_active {
        (SpriteKind::PlayerFireCracker, None)
    } else if *state.powerup_charges > 0 && ufo_target.is_some() {
        (SpriteKind::PlayerRocketSeeking, ufo_target.map(|(id, _)| id))
    } else {
        (SpriteKind::PlayerRocket, None)
    };

    let direction = match ufo_target {
        Some((_, center)) => aim_direction(origin, center),
        None => MovementDirection::Up,
    };

    let pool = pools.get_mut(kind);
    if let Some(rocket) = pool.acquire(rng) {
        rocket.position = origin - rocket.size * 0.5;
        rocket.movement_direction = direction;
        rocket.seek_target = seek_target;
        if kind == SpriteKind::PlayerRocketSeeking {
            *state.powerup_charges -= 1;
        }
        state.audio_events.push(AudioEvent::RocketLaunch { kind });
    }
}

/// Nearest live UFO boss or enemy to a point: (id, center).
fn nearest_ufo_target(pools: &Pools, from: DVec2) -> Option<(u32, DVec2)> {
    pools
        .get(SpriteKind::UfoBoss)
        .iter_active()
        .chain(pools.get(SpriteKind::UfoEnemy).iter_active())
        .filter(|t| !t.is_dead())
        .map(|t| (t.id, t.hit_box().center()))
        .min_by(|a, b| {
            let da = a.1.distance_squared(from);
            let db = b.1.distance_squared(from);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
}

fn drift_road_sprites(pools: &mut Pools, state: &MoveState<'_>) {
    for kind in DRIFT_KINDS {
        let pool = pools.get_mut(kind);
        for sprite in pool.iter_active_mut() {
            let speed = (state.scene_speed + sprite.speed_offset) * state.slow_factor;
            sprite.position.x += speed;
            sprite.position.y += speed * sprite.isometric_displacement;
            if sprite.is_blasting {
                sprite.fade(BLAST_FADE_STEP);
            }
        }
    }
}

/// When two vehicles crowd the same lane, the pair settles on the
/// slower speed so neither drives through the other.
fn prevent_vehicle_overlap(pools: &mut Pools) {
    let vehicles: Vec<(u32, honk_core::types::HitBox, f64)> = pools
        .get(SpriteKind::Vehicle)
        .iter_active()
        .map(|v| (v.id, v.distant_hit_box(), v.speed_offset))
        .collect();

    let mut adjusted: Vec<(u32, f64)> = Vec::new();
    for i in 0..vehicles.len() {
        for j in (i + 1)..vehicles.len() {
            let (id_a, box_a, off_a) = &vehicles[i];
            let (id_b, box_b, off_b) = &vehicles[j];
            if box_a.intersects(box_b) && box_a.intersects_horizontally(box_b) {
                let slower = off_a.min(*off_b);
                adjusted.push((*id_a, slower));
                adjusted.push((*id_b, slower));
            }
        }
    }

    let pool = pools.get_mut(SpriteKind::Vehicle);
    for (id, offset) in adjusted {
        if let Some(vehicle) = pool.get_mut(id) {
            vehicle.speed_offset = offset;
        }
    }
}

/// Vehicles honk on their own timers, silenced while a boss or enemy
/// wave holds the scene.
fn update_vehicle_honks(pools: &mut Pools, rng: &mut ChaCha8Rng, state: &mut MoveState<'_>) {
    let combat_active = pools.get(SpriteKind::UfoBoss).has_active()
        || pools.get(SpriteKind::VehicleBoss).has_active()
        || pools.get(SpriteKind::UfoEnemy).has_active();
    if combat_active {
        return;
    }

    let mut honk_positions: Vec<DVec2> = Vec::new();
    {
        let pool = pools.get_mut(SpriteKind::Vehicle);
        for vehicle in pool.iter_active_mut() {
            if !vehicle.will_honk || vehicle.is_blasting {
                continue;
            }
            vehicle.honk_delay -= 1.0;
            if vehicle.honk_delay <= 0.0 {
                honk_positions.push(vehicle.position);
                vehicle.honk_delay = rng.gen_range(HONK_DELAY_MIN..HONK_DELAY_MAX);
            }
        }
    }

    let pool = pools.get_mut(SpriteKind::Honk);
    for position in honk_positions {
        if let Some(honk) = pool.acquire(rng) {
            honk.position = position;
            state.audio_events.push(AudioEvent::Honk);
        }
    }
}

/// Honk bubbles drift with the road and fade out.
fn update_honks(pools: &mut Pools, state: &MoveState<'_>) {
    let pool = pools.get_mut(SpriteKind::Honk);
    for honk in pool.iter_active_mut() {
        let speed = state.scene_speed * state.slow_factor;
        honk.position.x += speed;
        honk.position.y += speed * ISOMETRIC_DISPLACEMENT;
        honk.fade(HONK_FADE_STEP);
    }
}

/// Directional rockets: fly until the fuse runs out, then blast and fade.
fn update_rockets(pools: &mut Pools, state: &mut MoveState<'_>) {
    let rocket_kinds = [
        SpriteKind::PlayerRocket,
        SpriteKind::PlayerFireCracker,
        SpriteKind::UfoBossRocket,
        SpriteKind::VehicleBossRocket,
        SpriteKind::UfoEnemyRocket,
    ];

    for kind in rocket_kinds {
        let pool = pools.get_mut(kind);
        for rocket in pool.iter_active_mut() {
            if rocket.is_blasting {
                rocket.fade(BLAST_FADE_STEP);
                continue;
            }
            let speed = (state.scene_speed + rocket.speed_offset) * state.slow_factor;
            rocket.position += fsm::direction_delta(rocket.movement_direction, speed);
            rocket.blast_delay -= 1.0;
            if rocket.blast_delay <= 0.0 {
                rocket.set_blast();
                state.audio_events.push(AudioEvent::Blast { kind });
            }
        }
    }
}

/// Seeking rockets close on their target with a per-axis lag; losing
/// the target detonates them.
fn update_seeking_rockets(pools: &mut Pools, state: &mut MoveState<'_>) {
    let seeking_kinds = [
        SpriteKind::PlayerRocketSeeking,
        SpriteKind::UfoBossRocketSeeking,
    ];

    for kind in seeking_kinds {
        let targets: Vec<(u32, Option<DVec2>)> = pools
            .get(kind)
            .iter_active()
            .filter(|r| !r.is_blasting)
            .map(|r| (r.id, r.seek_target.and_then(|t| target_center(pools, t))))
            .collect();

        let pool = pools.get_mut(kind);
        for rocket in pool.iter_active_mut() {
            if rocket.is_blasting {
                rocket.fade(BLAST_FADE_STEP);
                continue;
            }
            let target = targets
                .iter()
                .find(|(id, _)| *id == rocket.id)
                .and_then(|(_, center)| *center);
            match target {
                Some(center) => {
                    let from = rocket.hit_box().center();
                    let delta = DVec2::new(
                        (center.x - from.x) / SEEKING_ROCKET_LAG,
                        (center.y - from.y) / SEEKING_ROCKET_LAG,
                    );
                    rocket.position += delta * state.slow_factor;
                    rocket.blast_delay -= 1.0;
                    if rocket.blast_delay <= 0.0 {
                        rocket.set_blast();
                        state.audio_events.push(AudioEvent::Blast { kind });
                    }
                }
                None => {
                    rocket.set_blast();
                    state.audio_events.push(AudioEvent::Blast { kind });
                }
            }
        }
    }
}

fn target_center(pools: &Pools, id: u32) -> Option<DVec2> {
    pools
        .iter()
        .flat_map(|p| p.iter_active())
        .find(|s| s.id == id && !s.is_dead())
        .map(|s| s.hit_box().center())
}

/// Live enemies drift with the road; dead ones fade out in place.
fn update_ufo_enemies(pools: &mut Pools, state: &MoveState<'_>) {
    let pool = pools.get_mut(SpriteKind::UfoEnemy);
    for enemy in pool.iter_active_mut() {
        if enemy.is_dead() {
            enemy.fade(BLAST_FADE_STEP);
            continue;
        }
        let speed = (state.scene_speed + enemy.speed_offset) * state.slow_factor;
        enemy.position.x += speed;
        enemy.position.y += speed * enemy.isometric_displacement;
    }
}

/// Apply the boss AI verdict; dead bosses shrink away instead.
fn update_bosses(
    pools: &mut Pools,
    rng: &mut ChaCha8Rng,
    bounds: &SceneBounds,
    state: &mut MoveState<'_>,
) {
    let player_box = pools
        .player()
        .map(|p| p.hit_box())
        .unwrap_or_default();

    for kind in [SpriteKind::UfoBoss, SpriteKind::VehicleBoss] {
        let pool = pools.get_mut(kind);
        for boss in pool.iter_active_mut() {
            if boss.is_dead() {
                boss.scale = (boss.scale - BOSS_SHRINK_STEP).max(0.0);
                continue;
            }

            let speed = (state.scene_speed + boss.speed_offset) * state.slow_factor;
            let ctx = BossContext {
                kind,
                pattern: boss.movement_pattern,
                direction: boss.movement_direction,
                is_attacking: boss.is_attacking,
                hit_box: boss.hit_box(),
                bounds: *bounds,
                player_box,
                speed,
                pattern_change_delay: boss.pattern_change_delay,
            };
            let update = fsm::evaluate(&ctx);
            boss.position += update.displacement;
            boss.movement_direction = update.direction;
            boss.is_attacking = update.is_attacking;
            boss.pattern_change_delay = update.pattern_change_delay;
            if update.needs_pattern_change {
                let (pattern, delay) = fsm::random_pattern(kind, rng);
                boss.movement_pattern = pattern;
                boss.pattern_change_delay = delay;
                boss.movement_direction = MovementDirection::None;
            }

            apply_hover(boss, kind, state.slow_factor);
        }
    }
}

/// UFO bosses bob vertically on a fixed half-period.
fn apply_hover(boss: &mut honk_core::sprite::Sprite, kind: SpriteKind, slow_factor: f64) {
    let profile = get_profile(kind);
    if profile.hover_speed == 0.0 {
        return;
    }
    boss.hover_delay -= 1.0;
    if boss.hover_delay <= -profile.hover_delay {
        boss.hover_delay = profile.hover_delay;
    }
    let direction = if boss.hover_delay >= 0.0 { 1.0 } else { -1.0 };
    boss.position.y += profile.hover_speed * direction * slow_factor;
}

/// Shadows track their parent; orphaned shadows are left for the
/// recycle phase.
fn sync_drop_shadows(pools: &mut Pools) {
    let parents: Vec<(u32, DVec2, DVec2)> = pools
        .iter()
        .filter(|p| p.kind() != SpriteKind::DropShadow)
        .flat_map(|p| p.iter_active())
        .map(|s| (s.id, s.position, s.size))
        .collect();

    let pool = pools.get_mut(SpriteKind::DropShadow);
    for shadow in pool.iter_active_mut() {
        let Some(parent_id) = shadow.attached_to else {
            continue;
        };
        if let Some((_, position, size)) = parents.iter().find(|(id, _, _)| *id == parent_id) {
            shadow.position = DVec2::new(
                position.x + size.x * 0.5 - shadow.size.x * 0.5,
                position.y + size.y + DROP_SHADOW_DISTANCE,
            );
        }
    }
}
