//! Simulation constants and tuning parameters.

use glam::DVec2;

// --- Tick cadence ---

/// External timer period in milliseconds.
pub const FRAME_TIME_MS: u64 = 19;

/// Seconds per tick.
pub const DT: f64 = FRAME_TIME_MS as f64 / 1000.0;

// --- Scene ---

/// Design-space scene width in pixels.
pub const SCENE_WIDTH: f64 = 1920.0;

/// Design-space scene height in pixels.
pub const SCENE_HEIGHT: f64 = 1080.0;

/// Global scene speed (pixels per tick along the primary axis).
pub const DEFAULT_SCENE_SPEED: f64 = 5.0;

/// Default per-sprite speed offset magnitude.
pub const DEFAULT_SPEED_OFFSET: f64 = 3.0;

/// Secondary-axis displacement as a fraction of primary-axis motion.
/// Models the pseudo-3D road perspective.
pub const ISOMETRIC_DISPLACEMENT: f64 = 0.5;

/// Sentinel park position for inactive sprites. Far enough off-scene
/// that no hit box built from it can intersect anything on-scene.
pub const PARK_POSITION: DVec2 = DVec2::new(-3000.0, -3000.0);

// --- Slow motion ---

/// Divisor applied to all displacement while slow motion is active.
pub const SLOW_MOTION_REDUCTION_FACTOR: f64 = 4.0;

/// Slow motion duration in ticks.
pub const SLOW_MOTION_DELAY_TICKS: u32 = 240;

// --- Generator periods (ticks) ---

pub const VEHICLE_SPAWN_PERIOD: u32 = 100;
pub const ROAD_MARK_SPAWN_PERIOD: u32 = 30;
pub const TREE_SPAWN_PERIOD: u32 = 30;
pub const HEDGE_SPAWN_PERIOD: u32 = 16;
pub const LAMP_SPAWN_PERIOD: u32 = 90;
pub const BILLBOARD_SPAWN_PERIOD: u32 = 180;
pub const CLOUD_SPAWN_PERIOD: u32 = 400;
pub const UFO_BOSS_SPAWN_PERIOD: u32 = 100;
pub const UFO_BOSS_ROCKET_SPAWN_PERIOD: u32 = 40;
pub const UFO_BOSS_ROCKET_SEEKING_SPAWN_PERIOD: u32 = 200;
pub const VEHICLE_BOSS_SPAWN_PERIOD: u32 = 10;
pub const VEHICLE_BOSS_ROCKET_SPAWN_PERIOD: u32 = 50;
pub const UFO_ENEMY_SPAWN_PERIOD: u32 = 180;
pub const UFO_ENEMY_ROCKET_SPAWN_PERIOD: u32 = 50;
pub const HEALTH_PICKUP_SPAWN_PERIOD: u32 = 500;
pub const POWER_UP_PICKUP_SPAWN_PERIOD: u32 = 600;

// --- Difficulty thresholds ---

/// Score at which the first vehicle boss appears.
pub const VEHICLE_BOSS_RELEASE_POINT: f64 = 25.0;
pub const VEHICLE_BOSS_RELEASE_POINT_INCREASE: f64 = 15.0;

/// Score at which the first UFO boss appears.
pub const UFO_BOSS_RELEASE_POINT: f64 = 50.0;
pub const UFO_BOSS_RELEASE_POINT_INCREASE: f64 = 15.0;

/// Score at which UFO enemy waves start.
pub const UFO_ENEMY_RELEASE_POINT: f64 = 80.0;
pub const UFO_ENEMY_RELEASE_POINT_INCREASE: f64 = 10.0;

/// Boss health = release point difference * this factor.
pub const BOSS_HEALTH_SCALE: f64 = 1.5;

/// Enemies armed per UFO enemy threshold crossing.
pub const UFO_ENEMY_WAVE_SIZE: u32 = 5;

// --- Combat ---

pub const PLAYER_MAX_HEALTH: f64 = 100.0;

/// Health lost by the player per rocket hit.
pub const PLAYER_HIT_LOSS: f64 = 5.0;

/// Health lost by a boss or UFO enemy per player rocket hit.
pub const BOSS_HIT_LOSS: f64 = 5.0;

/// Health restored by a health pickup.
pub const HEALTH_PICKUP_GAIN: f64 = 10.0;

/// Seeking rockets granted by a power-up.
pub const POWER_UP_CHARGES: u32 = 3;

// --- Scoring ---

pub const SCORE_VEHICLE_BLAST: u32 = 5;
pub const SCORE_UFO_ENEMY_KILL: u32 = 5;
pub const SCORE_BOSS_KILL: u32 = 5;

// --- Sprite animation ---

/// Opacity lost per tick by a honk.
pub const HONK_FADE_STEP: f64 = 0.06;

/// Opacity lost per tick by a blasting rocket.
pub const BLAST_FADE_STEP: f64 = 0.1;

/// Ticks a rocket flies before self-blasting.
pub const ROCKET_BLAST_DELAY: f64 = 35.0;

/// Scale lost per tick by a dead, shrinking boss.
pub const BOSS_SHRINK_STEP: f64 = 0.02;

/// Ticks between vehicle honks.
pub const HONK_DELAY_MIN: f64 = 30.0;
pub const HONK_DELAY_MAX: f64 = 80.0;

/// Seeking rocket lag divisor: displacement = distance / lag per axis.
pub const SEEKING_ROCKET_LAG: f64 = 30.0;

/// Vertical gap between a sprite and its drop shadow.
pub const DROP_SHADOW_DISTANCE: f64 = 50.0;

// --- Boss AI ---

/// Pattern reselection timer range, whole ticks in [40, 60).
pub const BOSS_PATTERN_CHANGE_MIN: f64 = 40.0;
pub const BOSS_PATTERN_CHANGE_MAX: f64 = 60.0;

/// Dead zone around the player center before the seek pattern moves.
pub const BOSS_SEEK_GRACE: f64 = 7.0;

/// Seek lag divisor: per-axis speed = distance / lag.
pub const BOSS_SEEK_LAG: f64 = 125.0;

/// UFO boss hover amplitude (pixels per tick) and half-period (ticks).
pub const BOSS_HOVER_SPEED: f64 = 0.5;
pub const BOSS_HOVER_DELAY: f64 = 15.0;

/// Fraction of scene width a UFO boss crosses before attacking.
pub const UFO_BOSS_STAGING_FRACTION: f64 = 1.0 / 3.0;

/// Fraction of scene width a vehicle boss crosses before attacking.
pub const VEHICLE_BOSS_STAGING_FRACTION: f64 = 0.4;

// --- Player ---

/// Player movement speed (pixels per tick at full stick deflection).
pub const PLAYER_MOVE_SPEED: f64 = 6.0;
