//! Tests for the pools, generators, thresholds, and the scene pipeline.

use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use honk_core::commands::PlayerCommand;
use honk_core::constants::*;
use honk_core::enums::{ScenePhase, SpriteKind};
use honk_core::events::AudioEvent;
use honk_core::templates;

use crate::engine::{Scene, SceneConfig};
use crate::generator::Generator;
use crate::pool::Pools;
use crate::systems;
use crate::systems::gameplay::GameplayState;
use crate::threshold::Threshold;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn running_scene(seed: u64) -> Scene {
    let mut scene = Scene::new(SceneConfig {
        seed,
        ..Default::default()
    })
    .unwrap();
    scene.queue_command(PlayerCommand::StartGame);
    scene.tick();
    scene
}

// ---- Pools ----

#[test]
fn test_pools_prefill_to_template_capacity() {
    let pools = Pools::new().unwrap();
    for kind in SpriteKind::ALL {
        let template = templates::template(kind).unwrap();
        let pool = pools.get(kind);
        assert_eq!(pool.capacity(), template.capacity);
        assert_eq!(pool.active_count(), 0, "{kind:?} should start parked");
    }
}

#[test]
fn test_acquire_exhaustion_returns_none() {
    let mut pools = Pools::new().unwrap();
    let mut rng = rng(1);
    let capacity = pools.get(SpriteKind::Vehicle).capacity();

    for _ in 0..capacity {
        assert!(pools.get_mut(SpriteKind::Vehicle).acquire(&mut rng).is_some());
    }
    assert!(
        pools.get_mut(SpriteKind::Vehicle).acquire(&mut rng).is_none(),
        "exhausted pool must return None"
    );
}

#[test]
fn test_vehicle_pool_exhausts_without_recycling() {
    let mut pools = Pools::new().unwrap();
    let mut generator = Generator::new(SpriteKind::Vehicle, VEHICLE_SPAWN_PERIOD);
    let mut rng = rng(17);
    let capacity = pools.get(SpriteKind::Vehicle).capacity();
    assert_eq!(capacity, 8);

    // With nothing ever released, the 8 fires over 850 ticks land in
    // 8 fresh slots and the pool runs dry.
    for _ in 0..850 {
        if generator.step(&mut rng) {
            assert!(pools.get_mut(SpriteKind::Vehicle).acquire(&mut rng).is_some());
        }
    }
    assert_eq!(pools.get(SpriteKind::Vehicle).active_count(), capacity);
    assert!(pools.get_mut(SpriteKind::Vehicle).acquire(&mut rng).is_none());
}

#[test]
fn test_spawned_vehicles_keep_positive_net_speed() {
    let mut pools = Pools::new().unwrap();
    let mut rng = rng(18);

    // A net-negative speed would back a fresh vehicle off its top-edge
    // entry position and recycle it the same tick.
    for _ in 0..100 {
        let (id, offset) = {
            let vehicle = pools.get_mut(SpriteKind::Vehicle).acquire(&mut rng).unwrap();
            (vehicle.id, vehicle.speed_offset)
        };
        assert!(
            DEFAULT_SCENE_SPEED + offset >= 1.0,
            "vehicle spawned with net speed {}",
            DEFAULT_SCENE_SPEED + offset
        );
        pools.get_mut(SpriteKind::Vehicle).release(id);
    }
}

#[test]
fn test_release_parks_and_is_idempotent() {
    let mut pools = Pools::new().unwrap();
    let mut rng = rng(2);

    let id = pools
        .get_mut(SpriteKind::Vehicle)
        .acquire(&mut rng)
        .unwrap()
        .id;
    pools.get_mut(SpriteKind::Vehicle).release(id);
    pools.get_mut(SpriteKind::Vehicle).release(id);

    let sprite = pools.get(SpriteKind::Vehicle).get(id).unwrap();
    assert!(!sprite.active);
    assert_eq!(sprite.position, PARK_POSITION);
    assert_eq!(pools.get(SpriteKind::Vehicle).active_count(), 0);
}

#[test]
fn test_release_then_acquire_resets_aux_state() {
    let mut pools = Pools::new().unwrap();
    let mut rng = rng(3);

    // Player pool has capacity 1, so the same slot must come back.
    let first_id = {
        let sprite = pools.get_mut(SpriteKind::Player).acquire(&mut rng).unwrap();
        sprite.health = 12.0;
        sprite.opacity = 0.2;
        sprite.is_blasting = true;
        sprite.blast_delay = 99.0;
        sprite.id
    };
    pools.get_mut(SpriteKind::Player).release(first_id);

    let sprite = pools.get_mut(SpriteKind::Player).acquire(&mut rng).unwrap();
    assert_eq!(sprite.id, first_id);
    assert_eq!(sprite.health, PLAYER_MAX_HEALTH);
    assert_eq!(sprite.opacity, 1.0);
    assert!(!sprite.is_blasting);
    assert_eq!(sprite.blast_delay, 0.0);
}

// ---- Generators ----

#[test]
fn test_generator_fires_on_exact_period() {
    let mut generator = Generator::new(SpriteKind::RoadMark, 30);
    let mut rng = rng(4);

    for cycle in 0..3 {
        for i in 0..29 {
            assert!(
                !generator.step(&mut rng),
                "cycle {cycle} fired early at tick {i}"
            );
        }
        assert!(generator.step(&mut rng), "cycle {cycle} did not fire");
    }
}

#[test]
fn test_generator_zero_period_fires_every_tick() {
    let mut generator = Generator::new(SpriteKind::Honk, 0);
    let mut rng = rng(5);
    for _ in 0..10 {
        assert!(generator.step(&mut rng));
    }
}

#[test]
fn test_generator_jitter_stays_in_range() {
    let mut generator = Generator::new(SpriteKind::Cloud, 400).with_jitter();
    let mut rng = rng(6);

    // Burn the first (unjittered) cycle.
    let mut ticks = 0;
    while !generator.step(&mut rng) {
        ticks += 1;
    }
    assert_eq!(ticks, 399);

    // Subsequent gaps carry jitter in [0, period / 3].
    for _ in 0..5 {
        let mut gap = 1;
        while !generator.step(&mut rng) {
            gap += 1;
        }
        assert!((400..=400 + 133).contains(&gap), "gap {gap} out of range");
    }
}

// ---- Thresholds ----

#[test]
fn test_threshold_ratchet_scenario() {
    let mut threshold = Threshold::new(25.0, 15.0);
    assert!(!threshold.should_release(24.0));
    assert!(threshold.should_release(25.0));

    assert_eq!(threshold.release_point_difference(25.0), 25.0);
    threshold.increase(25.0);
    assert_eq!(threshold.limit(), 40.0);

    assert!(!threshold.should_release(39.0));
    assert!(threshold.should_release(40.0));
    assert_eq!(threshold.release_point_difference(40.0), 15.0);
}

#[test]
fn test_threshold_reset_restores_initial_limit() {
    let mut threshold = Threshold::new(50.0, 15.0);
    threshold.increase(50.0);
    threshold.increase(80.0);
    threshold.reset();
    assert_eq!(threshold.limit(), 50.0);
    assert!(threshold.should_release(50.0));
    assert_eq!(threshold.release_point_difference(50.0), 50.0);
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut scene_a = running_scene(12345);
    let mut scene_b = running_scene(12345);

    for tick in 0..300 {
        if tick % 40 == 0 {
            scene_a.queue_command(PlayerCommand::SetMovement { dx: 0.5, dy: -0.3 });
            scene_b.queue_command(PlayerCommand::SetMovement { dx: 0.5, dy: -0.3 });
            scene_a.queue_command(PlayerCommand::Attack);
            scene_b.queue_command(PlayerCommand::Attack);
        }
        let snap_a = scene_a.tick();
        let snap_b = scene_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged at tick {tick}");
    }
}

#[test]
fn test_determinism_different_seeds_diverge() {
    let mut scene_a = running_scene(111);
    let mut scene_b = running_scene(222);

    let mut diverged = false;
    for _ in 0..500 {
        let json_a = serde_json::to_string(&scene_a.tick()).unwrap();
        let json_b = serde_json::to_string(&scene_b.tick()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "different seeds should produce divergent sessions");
}

// ---- Scene lifecycle ----

#[test]
fn test_start_game_spawns_player_and_shadow() {
    let scene = running_scene(7);
    assert_eq!(scene.phase(), ScenePhase::Running);
    assert_eq!(scene.pools().get(SpriteKind::Player).active_count(), 1);
    assert_eq!(scene.pools().get(SpriteKind::DropShadow).active_count(), 1);
}

#[test]
fn test_pause_freezes_time_and_state() {
    let mut scene = running_scene(8);
    for _ in 0..10 {
        scene.tick();
    }
    scene.queue_command(PlayerCommand::Pause);
    let paused = scene.tick();
    assert_eq!(paused.phase, ScenePhase::Paused);

    let tick_before = scene.time().tick;
    let frozen = serde_json::to_string(&scene.tick().sprites).unwrap();
    for _ in 0..5 {
        let snap = scene.tick();
        assert_eq!(snap.time.tick, tick_before);
        assert_eq!(serde_json::to_string(&snap.sprites).unwrap(), frozen);
    }

    scene.queue_command(PlayerCommand::Resume);
    scene.tick();
    assert!(scene.time().tick > tick_before);
}

#[test]
fn test_stop_parks_everything() {
    let mut scene = running_scene(9);
    for _ in 0..200 {
        scene.tick();
    }
    scene.queue_command(PlayerCommand::Stop);
    let snap = scene.tick();
    assert_eq!(snap.phase, ScenePhase::MainMenu);
    assert!(snap.sprites.is_empty());
    for kind in SpriteKind::ALL {
        assert_eq!(scene.pools().get(kind).active_count(), 0);
    }
}

#[test]
fn test_vehicle_count_never_exceeds_capacity() {
    let mut scene = running_scene(10);
    let capacity = scene.pools().get(SpriteKind::Vehicle).capacity();
    for _ in 0..850 {
        scene.tick();
        assert!(scene.pools().get(SpriteKind::Vehicle).active_count() <= capacity);
    }
}

#[test]
fn test_spawned_sprites_move_in_their_first_tick() {
    let mut scene = running_scene(11);
    // Road marks spawn on a 30-tick period at the top edge and drift
    // down the same tick, so an active one is never exactly at -height.
    for _ in 0..60 {
        scene.tick();
        for mark in scene.pools().get(SpriteKind::RoadMark).iter_active() {
            assert!(mark.position.y > -mark.size.y);
        }
    }
    assert!(scene.pools().get(SpriteKind::RoadMark).active_count() > 0);
}

#[test]
fn test_attack_launches_rocket() {
    let mut scene = running_scene(12);
    scene.queue_command(PlayerCommand::Attack);
    let snap = scene.tick();
    assert_eq!(scene.pools().get(SpriteKind::PlayerRocket).active_count(), 1);
    assert!(snap
        .audio_events
        .iter()
        .any(|e| matches!(e, AudioEvent::RocketLaunch { .. })));
}

// ---- Boss release ----

#[test]
fn test_boss_release_flow() {
    let mut scene = running_scene(13);
    scene.set_score(25);

    let mut entry_seen = false;
    for _ in 0..VEHICLE_BOSS_SPAWN_PERIOD + 1 {
        let snap = scene.tick();
        if snap
            .audio_events
            .iter()
            .any(|e| matches!(e, AudioEvent::BossEntry { .. }))
        {
            entry_seen = true;
        }
    }
    assert!(entry_seen, "boss entry audio never fired");
    assert_eq!(scene.pools().get(SpriteKind::VehicleBoss).active_count(), 1);

    let boss = scene
        .pools()
        .get(SpriteKind::VehicleBoss)
        .first_active()
        .unwrap();
    assert_eq!(boss.health, 25.0 * BOSS_HEALTH_SCALE);
    assert_eq!(scene.difficulty().vehicle_boss.limit(), 40.0);

    let snap = scene.tick();
    assert!(snap.slow_motion_active);
    let view = snap.boss.expect("snapshot should carry the boss view");
    assert_eq!(view.kind, SpriteKind::VehicleBoss);
    assert_eq!(view.max_health, 25.0 * BOSS_HEALTH_SCALE);
}

#[test]
fn test_single_boss_on_scene() {
    let mut scene = running_scene(14);
    scene.set_score(60);

    // Both thresholds are open; only one boss may be released.
    for _ in 0..200 {
        scene.tick();
        let bosses = scene.pools().get(SpriteKind::UfoBoss).active_count()
            + scene.pools().get(SpriteKind::VehicleBoss).active_count();
        assert!(bosses <= 1, "two bosses active at once");
    }
}

#[test]
fn test_enemy_wave_arms_and_spawns() {
    let mut scene = running_scene(15);
    scene.set_score(80);
    scene.tick();
    let difficulty = scene.difficulty();
    assert_eq!(difficulty.ufo_enemies_remaining, UFO_ENEMY_WAVE_SIZE);
    assert_eq!(difficulty.ufo_enemy.limit(), 90.0);

    let mut seen = false;
    for _ in 0..(UFO_ENEMY_SPAWN_PERIOD as usize * 3) {
        scene.tick();
        seen = seen || scene.pools().get(SpriteKind::UfoEnemy).active_count() > 0;
    }
    assert!(seen, "no ufo enemy spawned from the armed wave");
}

// ---- Gameplay rules (system level) ----

fn gameplay_fixture() -> (Pools, ChaCha8Rng) {
    (Pools::new().unwrap(), rng(42))
}

fn run_gameplay(
    pools: &mut Pools,
    score: &mut u32,
    audio: &mut Vec<AudioEvent>,
) -> bool {
    let mut charges = 0;
    let mut slow_motion = 0;
    systems::gameplay::run(
        pools,
        &mut GameplayState {
            score,
            powerup_charges: &mut charges,
            slow_motion_ticks: &mut slow_motion,
            audio_events: audio,
        },
    )
}

#[test]
fn test_rocket_damages_boss_once() {
    let (mut pools, mut rng) = gameplay_fixture();
    let boss_id = {
        let boss = pools.get_mut(SpriteKind::UfoBoss).acquire(&mut rng).unwrap();
        boss.position = DVec2::new(500.0, 500.0);
        boss.health = 20.0;
        boss.id
    };
    {
        let rocket = pools
            .get_mut(SpriteKind::PlayerRocket)
            .acquire(&mut rng)
            .unwrap();
        rocket.position = DVec2::new(510.0, 510.0);
    }

    let mut score = 0;
    let mut audio = Vec::new();
    run_gameplay(&mut pools, &mut score, &mut audio);
    assert_eq!(
        pools.get(SpriteKind::UfoBoss).get(boss_id).unwrap().health,
        20.0 - BOSS_HIT_LOSS
    );

    // The rocket is blasting now; a second pass must not re-apply damage.
    run_gameplay(&mut pools, &mut score, &mut audio);
    assert_eq!(
        pools.get(SpriteKind::UfoBoss).get(boss_id).unwrap().health,
        20.0 - BOSS_HIT_LOSS
    );
}

#[test]
fn test_parked_sprites_never_collide() {
    let (mut pools, mut rng) = gameplay_fixture();
    {
        let player = pools.get_mut(SpriteKind::Player).acquire(&mut rng).unwrap();
        player.position = PARK_POSITION + DVec2::new(10.0, 10.0);
    }
    // Rocket left parked: inactive, so no rule may touch the player.
    let mut score = 0;
    let mut audio = Vec::new();
    let game_over = run_gameplay(&mut pools, &mut score, &mut audio);
    assert!(!game_over);
    assert!(audio.is_empty());
}

#[test]
fn test_enemy_rocket_kills_player() {
    let (mut pools, mut rng) = gameplay_fixture();
    {
        let player = pools.get_mut(SpriteKind::Player).acquire(&mut rng).unwrap();
        player.position = DVec2::new(400.0, 800.0);
        player.health = PLAYER_HIT_LOSS;
    }
    {
        let rocket = pools
            .get_mut(SpriteKind::UfoBossRocket)
            .acquire(&mut rng)
            .unwrap();
        rocket.position = DVec2::new(410.0, 810.0);
    }

    let mut score = 0;
    let mut audio = Vec::new();
    let game_over = run_gameplay(&mut pools, &mut score, &mut audio);
    assert!(game_over);
    assert!(audio.contains(&AudioEvent::PlayerHit));
    assert!(audio.contains(&AudioEvent::GameOver));
}

#[test]
fn test_health_pickup_caps_at_max() {
    let (mut pools, mut rng) = gameplay_fixture();
    let player_id = {
        let player = pools.get_mut(SpriteKind::Player).acquire(&mut rng).unwrap();
        player.position = DVec2::new(400.0, 800.0);
        player.health = PLAYER_MAX_HEALTH - 4.0;
        player.id
    };
    {
        let pickup = pools
            .get_mut(SpriteKind::HealthPickup)
            .acquire(&mut rng)
            .unwrap();
        pickup.position = DVec2::new(420.0, 820.0);
    }

    let mut score = 0;
    let mut audio = Vec::new();
    run_gameplay(&mut pools, &mut score, &mut audio);
    assert_eq!(
        pools.get(SpriteKind::Player).get(player_id).unwrap().health,
        PLAYER_MAX_HEALTH
    );
    assert_eq!(pools.get(SpriteKind::HealthPickup).active_count(), 0);
}

#[test]
fn test_vehicle_blast_scores() {
    let (mut pools, mut rng) = gameplay_fixture();
    let vehicle_id = loop {
        // Spawn until the honk roll lands on a honking vehicle.
        let vehicle = pools.get_mut(SpriteKind::Vehicle).acquire(&mut rng).unwrap();
        if vehicle.will_honk {
            vehicle.position = DVec2::new(600.0, 400.0);
            break vehicle.id;
        }
        let id = vehicle.id;
        pools.get_mut(SpriteKind::Vehicle).release(id);
    };
    {
        let rocket = pools
            .get_mut(SpriteKind::PlayerRocket)
            .acquire(&mut rng)
            .unwrap();
        rocket.position = DVec2::new(620.0, 420.0);
    }

    let mut score = 0;
    let mut audio = Vec::new();
    run_gameplay(&mut pools, &mut score, &mut audio);
    assert_eq!(score, SCORE_VEHICLE_BLAST);
    let vehicle = pools.get(SpriteKind::Vehicle).get(vehicle_id).unwrap();
    assert!(vehicle.is_blasting);
    assert!(!vehicle.will_honk);
}

#[test]
fn test_two_rockets_one_vehicle_scores_once() {
    let (mut pools, mut rng) = gameplay_fixture();
    let vehicle_id = loop {
        let vehicle = pools.get_mut(SpriteKind::Vehicle).acquire(&mut rng).unwrap();
        if vehicle.will_honk {
            vehicle.position = DVec2::new(600.0, 400.0);
            break vehicle.id;
        }
        let id = vehicle.id;
        pools.get_mut(SpriteKind::Vehicle).release(id);
    };
    // Two rockets overlap the same vehicle in the same tick.
    for offset in [0.0, 20.0] {
        let rocket = pools
            .get_mut(SpriteKind::PlayerRocket)
            .acquire(&mut rng)
            .unwrap();
        rocket.position = DVec2::new(620.0 + offset, 420.0);
    }

    let mut score = 0;
    let mut audio = Vec::new();
    run_gameplay(&mut pools, &mut score, &mut audio);
    assert_eq!(score, SCORE_VEHICLE_BLAST, "one vehicle pays out once");
    let vehicle_blasts = audio
        .iter()
        .filter(|e| {
            matches!(
                e,
                AudioEvent::Blast {
                    kind: SpriteKind::Vehicle
                }
            )
        })
        .count();
    assert_eq!(vehicle_blasts, 1);
    assert!(pools.get(SpriteKind::Vehicle).get(vehicle_id).unwrap().is_blasting);
}

// ---- Recycle ----

#[test]
fn test_offscreen_sprites_recycle_on_any_side() {
    let (mut pools, mut rng) = gameplay_fixture();
    let bounds = honk_core::types::SceneBounds::default();

    let positions = [
        DVec2::new(bounds.width + 1.0, 200.0),
        DVec2::new(-171.0, 200.0),
        DVec2::new(200.0, bounds.height + 1.0),
        DVec2::new(200.0, -121.0),
    ];
    for position in positions {
        let vehicle = pools.get_mut(SpriteKind::Vehicle).acquire(&mut rng).unwrap();
        vehicle.position = position;
    }
    // One on-scene vehicle stays.
    {
        let vehicle = pools.get_mut(SpriteKind::Vehicle).acquire(&mut rng).unwrap();
        vehicle.position = DVec2::new(500.0, 500.0);
    }

    let mut buffer = Vec::new();
    systems::recycle::run(&mut pools, &bounds, &mut buffer);
    assert_eq!(pools.get(SpriteKind::Vehicle).active_count(), 1);
}

#[test]
fn test_orphan_drop_shadow_recycles() {
    let (mut pools, mut rng) = gameplay_fixture();
    let bounds = honk_core::types::SceneBounds::default();

    let parent_id = {
        let boss = pools.get_mut(SpriteKind::UfoBoss).acquire(&mut rng).unwrap();
        boss.position = DVec2::new(500.0, 300.0);
        boss.health = 10.0;
        boss.id
    };
    {
        let shadow = pools
            .get_mut(SpriteKind::DropShadow)
            .acquire(&mut rng)
            .unwrap();
        shadow.position = DVec2::new(500.0, 480.0);
        shadow.attached_to = Some(parent_id);
    }

    let mut buffer = Vec::new();
    systems::recycle::run(&mut pools, &bounds, &mut buffer);
    assert_eq!(pools.get(SpriteKind::DropShadow).active_count(), 1);

    pools.get_mut(SpriteKind::UfoBoss).release(parent_id);
    systems::recycle::run(&mut pools, &bounds, &mut buffer);
    assert_eq!(pools.get(SpriteKind::DropShadow).active_count(), 0);
}

// ---- Slow motion ----

#[test]
fn test_slow_motion_scales_displacement() {
    let mut full = Pools::new().unwrap();
    let mut slowed = Pools::new().unwrap();
    let mut rng_a = rng(16);
    let mut rng_b = rng(16);
    let bounds = honk_core::types::SceneBounds::default();

    let id_a = {
        let v = full.get_mut(SpriteKind::Vehicle).acquire(&mut rng_a).unwrap();
        v.position = DVec2::new(100.0, 100.0);
        v.speed_offset = 0.0;
        v.will_honk = false;
        v.id
    };
    let id_b = {
        let v = slowed.get_mut(SpriteKind::Vehicle).acquire(&mut rng_b).unwrap();
        v.position = DVec2::new(100.0, 100.0);
        v.speed_offset = 0.0;
        v.will_honk = false;
        v.id
    };

    let mut run_movement = |pools: &mut Pools, rng: &mut ChaCha8Rng, slow_factor: f64| {
        let mut input = systems::movement::InputState::default();
        let mut charges = 0;
        let mut audio = Vec::new();
        systems::movement::run(
            pools,
            rng,
            &bounds,
            &mut systems::movement::MoveState {
                input: &mut input,
                powerup_charges: &mut charges,
                audio_events: &mut audio,
                scene_speed: DEFAULT_SCENE_SPEED,
                slow_factor,
            },
        );
    };

    run_movement(&mut full, &mut rng_a, 1.0);
    run_movement(&mut slowed, &mut rng_b, 1.0 / SLOW_MOTION_REDUCTION_FACTOR);

    let moved_full = full.get(SpriteKind::Vehicle).get(id_a).unwrap().position.x - 100.0;
    let moved_slow = slowed.get(SpriteKind::Vehicle).get(id_b).unwrap().position.x - 100.0;
    assert!((moved_full - DEFAULT_SCENE_SPEED).abs() < 1e-9);
    assert!((moved_slow - DEFAULT_SCENE_SPEED / SLOW_MOTION_REDUCTION_FACTOR).abs() < 1e-9);
}
