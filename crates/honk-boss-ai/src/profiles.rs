//! Per-boss behavior profiles.
//!
//! Consolidates the parameters that differentiate the flying UFO boss
//! from the road-bound vehicle boss.

use honk_core::constants::*;
use honk_core::enums::{BossMovementPattern, SpriteKind};

/// Behavior profile for a boss kind.
pub struct BossProfile {
    /// Movement patterns this boss may select from.
    pub patterns: &'static [BossMovementPattern],
    /// Pattern reselection timer range (ticks).
    pub pattern_change_min: f64,
    pub pattern_change_max: f64,
    /// Dead zone around the player center for the seek pattern.
    pub seek_grace: f64,
    /// Seek lag divisor: per-axis speed = distance / lag.
    pub seek_lag: f64,
    /// Hover amplitude per tick; 0 disables hovering.
    pub hover_speed: f64,
    /// Hover half-period in ticks.
    pub hover_delay: f64,
    /// Fraction of scene width crossed before the boss starts attacking.
    pub staging_fraction: f64,
}

const UFO_BOSS_PATTERNS: &[BossMovementPattern] = &[
    BossMovementPattern::PlayerSeeking,
    BossMovementPattern::IsometricSquare,
    BossMovementPattern::UpRightDownLeft,
    BossMovementPattern::UpLeftDownRight,
    BossMovementPattern::RightLeft,
    BossMovementPattern::UpDown,
];

// Road-bound: no vertical bounce patterns, no player seeking.
const VEHICLE_BOSS_PATTERNS: &[BossMovementPattern] = &[BossMovementPattern::RightLeft];

/// Get the behavior profile for a boss kind.
///
/// Non-boss kinds get the UFO profile; callers are expected to pass a
/// kind for which [`SpriteKind::is_boss`] holds.
pub fn get_profile(kind: SpriteKind) -> BossProfile {
    match kind {
        SpriteKind::VehicleBoss => BossProfile {
            patterns: VEHICLE_BOSS_PATTERNS,
            pattern_change_min: BOSS_PATTERN_CHANGE_MIN,
            pattern_change_max: BOSS_PATTERN_CHANGE_MAX,
            seek_grace: BOSS_SEEK_GRACE,
            seek_lag: BOSS_SEEK_LAG,
            hover_speed: 0.0,
            hover_delay: BOSS_HOVER_DELAY,
            staging_fraction: VEHICLE_BOSS_STAGING_FRACTION,
        },
        _ => BossProfile {
            patterns: UFO_BOSS_PATTERNS,
            pattern_change_min: BOSS_PATTERN_CHANGE_MIN,
            pattern_change_max: BOSS_PATTERN_CHANGE_MAX,
            seek_grace: BOSS_SEEK_GRACE,
            seek_lag: BOSS_SEEK_LAG,
            hover_speed: BOSS_HOVER_SPEED,
            hover_delay: BOSS_HOVER_DELAY,
            staging_fraction: UFO_BOSS_STAGING_FRACTION,
        },
    }
}
