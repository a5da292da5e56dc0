//! Score-gated difficulty ratchets.
//!
//! A threshold holds a release limit; once the score reaches it, the
//! gated content is released and the limit ratchets forward past the
//! score at release, so each release demands more score than the last.
//! `should_release` never mutates: callers pair every true result with
//! an `increase` in the same tick.

/// One difficulty gate over the session score.
#[derive(Debug, Clone, Copy)]
pub struct Threshold {
    limit: f64,
    increment: f64,
    last_release_score: f64,
    initial_limit: f64,
}

impl Threshold {
    pub fn new(limit: f64, increment: f64) -> Self {
        Self {
            limit,
            increment,
            last_release_score: 0.0,
            initial_limit: limit,
        }
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// Has the score reached the current release limit?
    pub fn should_release(&self, score: f64) -> bool {
        score >= self.limit
    }

    /// Score accumulated since the previous release. Scales released
    /// content (boss health grows with the gap between releases).
    pub fn release_point_difference(&self, score: f64) -> f64 {
        score - self.last_release_score
    }

    /// Ratchet the limit past the score at release and record it.
    pub fn increase(&mut self, score: f64) {
        self.limit = score + self.increment;
        self.last_release_score = score;
    }

    /// Back to the session-start state.
    pub fn reset(&mut self) {
        self.limit = self.initial_limit;
        self.last_release_score = 0.0;
    }
}

/// All difficulty gates for one session.
#[derive(Debug, Clone)]
pub struct Difficulty {
    pub vehicle_boss: Threshold,
    pub ufo_boss: Threshold,
    pub ufo_enemy: Threshold,
    /// Enemies still owed from armed waves; spawn draws these down.
    pub ufo_enemies_remaining: u32,
}

impl Difficulty {
    pub fn new() -> Self {
        use honk_core::constants::*;
        Self {
            vehicle_boss: Threshold::new(
                VEHICLE_BOSS_RELEASE_POINT,
                VEHICLE_BOSS_RELEASE_POINT_INCREASE,
            ),
            ufo_boss: Threshold::new(UFO_BOSS_RELEASE_POINT, UFO_BOSS_RELEASE_POINT_INCREASE),
            ufo_enemy: Threshold::new(UFO_ENEMY_RELEASE_POINT, UFO_ENEMY_RELEASE_POINT_INCREASE),
            ufo_enemies_remaining: 0,
        }
    }

    pub fn reset(&mut self) {
        self.vehicle_boss.reset();
        self.ufo_boss.reset();
        self.ufo_enemy.reset();
        self.ufo_enemies_remaining = 0;
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::new()
    }
}
