//! Periodic spawn scheduling.
//!
//! Each generator owns a countdown that starts at its period, ticks
//! down once per tick while the scene runs, and fires when it reaches
//! zero. On firing the countdown resets to the period plus an optional
//! random jitter in `[0, period / 3]`. A zero-period generator fires
//! on every tick.
//!
//! Firing only requests a spawn; the spawn system decides whether the
//! request is honored (pool capacity, difficulty gates, boss presence).

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use honk_core::constants::*;
use honk_core::enums::SpriteKind;

/// One scheduled spawn source for a sprite kind.
#[derive(Debug, Clone)]
pub struct Generator {
    pub kind: SpriteKind,
    period: u32,
    jittered: bool,
    countdown: u32,
}

impl Generator {
    pub fn new(kind: SpriteKind, period: u32) -> Self {
        Self {
            kind,
            period,
            jittered: false,
            countdown: period,
        }
    }

    /// Add random jitter to every reset after firing.
    pub fn with_jitter(mut self) -> Self {
        self.jittered = true;
        self
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// Count down one tick. Returns true when the generator fires.
    /// A zero-period generator fires on every call.
    pub fn step(&mut self, rng: &mut ChaCha8Rng) -> bool {
        if self.period == 0 {
            return true;
        }
        if self.countdown > 1 {
            self.countdown -= 1;
            return false;
        }
        self.countdown = self.period + self.jitter(rng);
        true
    }

    /// Restart the countdown from the full period (session start).
    pub fn reset(&mut self) {
        self.countdown = self.period;
    }

    fn jitter(&self, rng: &mut ChaCha8Rng) -> u32 {
        if self.jittered && self.period >= 3 {
            rng.gen_range(0..=self.period / 3)
        } else {
            0
        }
    }
}

/// The full generator table, in firing order. Decorations fire before
/// actors so z-sorting stays stable within a tick; boss rockets fire
/// after their boss so a freshly released boss can shoot the same tick.
pub fn generator_table() -> Vec<Generator> {
    use SpriteKind::*;

    vec![
        Generator::new(RoadMark, ROAD_MARK_SPAWN_PERIOD),
        Generator::new(RoadSideTree, TREE_SPAWN_PERIOD),
        Generator::new(RoadSideHedge, HEDGE_SPAWN_PERIOD),
        Generator::new(RoadSideLamp, LAMP_SPAWN_PERIOD),
        Generator::new(RoadSideBillboard, BILLBOARD_SPAWN_PERIOD),
        Generator::new(Cloud, CLOUD_SPAWN_PERIOD).with_jitter(),
        Generator::new(Vehicle, VEHICLE_SPAWN_PERIOD),
        Generator::new(VehicleBoss, VEHICLE_BOSS_SPAWN_PERIOD),
        Generator::new(VehicleBossRocket, VEHICLE_BOSS_ROCKET_SPAWN_PERIOD).with_jitter(),
        Generator::new(UfoBoss, UFO_BOSS_SPAWN_PERIOD),
        Generator::new(UfoBossRocket, UFO_BOSS_ROCKET_SPAWN_PERIOD).with_jitter(),
        Generator::new(UfoBossRocketSeeking, UFO_BOSS_ROCKET_SEEKING_SPAWN_PERIOD).with_jitter(),
        Generator::new(UfoEnemy, UFO_ENEMY_SPAWN_PERIOD).with_jitter(),
        Generator::new(UfoEnemyRocket, UFO_ENEMY_ROCKET_SPAWN_PERIOD).with_jitter(),
        Generator::new(HealthPickup, HEALTH_PICKUP_SPAWN_PERIOD).with_jitter(),
        Generator::new(PowerUpPickup, POWER_UP_PICKUP_SPAWN_PERIOD).with_jitter(),
    ]
}
