//! Boss movement finite state machine.
//!
//! Pure functions that compute per-tick displacement and state
//! transitions for boss sprites. Outer state: approaching a staging
//! position, then attacking. Inner state: the current movement pattern
//! with a directional sub-state that advances on scene-edge contact.

use glam::DVec2;
use rand::Rng;

use honk_core::constants::ISOMETRIC_DISPLACEMENT;
use honk_core::enums::{BossMovementPattern, MovementDirection, SpriteKind};
use honk_core::types::{HitBox, SceneBounds};

use crate::profiles::{get_profile, BossProfile};

/// Input to the boss FSM for a single tick.
pub struct BossContext {
    pub kind: SpriteKind,
    pub pattern: BossMovementPattern,
    pub direction: MovementDirection,
    pub is_attacking: bool,
    /// The boss's close hit box.
    pub hit_box: HitBox,
    pub bounds: SceneBounds,
    /// The player's close hit box, for seeking.
    pub player_box: HitBox,
    /// Effective speed this tick (scene speed + offset, slow motion applied).
    pub speed: f64,
    /// Remaining ticks before the pattern is reselected.
    pub pattern_change_delay: f64,
}

/// Output from the boss FSM.
pub struct BossUpdate {
    /// Displacement to apply to the boss position this tick.
    pub displacement: DVec2,
    pub direction: MovementDirection,
    pub is_attacking: bool,
    pub pattern_change_delay: f64,
    /// The pattern timer elapsed; the caller should reroll the pattern.
    pub needs_pattern_change: bool,
}

/// Evaluate the FSM for one boss tick.
pub fn evaluate(ctx: &BossContext) -> BossUpdate {
    let profile = get_profile(ctx.kind);

    if !ctx.is_attacking {
        return evaluate_approach(ctx, &profile);
    }

    let delay = ctx.pattern_change_delay - 1.0;
    if delay < 0.0 {
        return BossUpdate {
            displacement: DVec2::ZERO,
            direction: MovementDirection::None,
            is_attacking: true,
            pattern_change_delay: 0.0,
            needs_pattern_change: true,
        };
    }

    match ctx.pattern {
        BossMovementPattern::PlayerSeeking => seek_player(ctx, &profile, delay),
        BossMovementPattern::IsometricSquare => bounce(
            ctx,
            delay,
            &[
                MovementDirection::UpRight,
                MovementDirection::DownRight,
                MovementDirection::DownLeft,
                MovementDirection::UpLeft,
            ],
        ),
        BossMovementPattern::UpRightDownLeft => bounce(
            ctx,
            delay,
            &[MovementDirection::UpRight, MovementDirection::DownLeft],
        ),
        BossMovementPattern::UpLeftDownRight => bounce(
            ctx,
            delay,
            &[MovementDirection::UpLeft, MovementDirection::DownRight],
        ),
        BossMovementPattern::RightLeft => bounce(
            ctx,
            delay,
            &[MovementDirection::Right, MovementDirection::Left],
        ),
        BossMovementPattern::UpDown => {
            bounce(ctx, delay, &[MovementDirection::Up, MovementDirection::Down])
        }
    }
}

/// Pick a fresh pattern and reselection delay for a boss kind.
pub fn random_pattern<R: Rng>(kind: SpriteKind, rng: &mut R) -> (BossMovementPattern, f64) {
    let profile = get_profile(kind);
    let pattern = profile.patterns[rng.gen_range(0..profile.patterns.len())];
    let delay = rng.gen_range(profile.pattern_change_min..profile.pattern_change_max);
    (pattern, delay)
}

/// Per-tick displacement for a movement direction.
pub fn direction_delta(direction: MovementDirection, speed: f64) -> DVec2 {
    let iso = speed * ISOMETRIC_DISPLACEMENT;
    match direction {
        MovementDirection::None => DVec2::ZERO,
        MovementDirection::Up => DVec2::new(0.0, -speed),
        MovementDirection::Down => DVec2::new(0.0, speed),
        MovementDirection::Left => DVec2::new(-speed, 0.0),
        MovementDirection::Right => DVec2::new(speed, 0.0),
        MovementDirection::UpRight => DVec2::new(speed, -iso),
        MovementDirection::DownRight => DVec2::new(speed, iso),
        MovementDirection::DownLeft => DVec2::new(-speed, iso),
        MovementDirection::UpLeft => DVec2::new(-speed, -iso),
    }
}

/// Drift toward the staging position; flip to attacking once past it.
fn evaluate_approach(ctx: &BossContext, profile: &BossProfile) -> BossUpdate {
    let displacement = DVec2::new(ctx.speed, ctx.speed * ISOMETRIC_DISPLACEMENT);
    let staged = ctx.hit_box.min.x + displacement.x > ctx.bounds.width * profile.staging_fraction;

    BossUpdate {
        displacement,
        direction: MovementDirection::None,
        is_attacking: staged,
        pattern_change_delay: ctx.pattern_change_delay,
        needs_pattern_change: false,
    }
}

/// Close on the player center with a lag divisor, inside a dead zone.
fn seek_player(ctx: &BossContext, profile: &BossProfile, delay: f64) -> BossUpdate {
    let boss_center = ctx.hit_box.center();
    let target = ctx.player_box.min;
    let mut displacement = DVec2::ZERO;

    if target.y < boss_center.y - profile.seek_grace {
        displacement.y = -((target.y - boss_center.y).abs() / profile.seek_lag);
    } else if target.y > boss_center.y + profile.seek_grace {
        displacement.y = (target.y - boss_center.y).abs() / profile.seek_lag;
    }

    if target.x < boss_center.x - profile.seek_grace {
        displacement.x = -((target.x - boss_center.x).abs() / profile.seek_lag);
    } else if target.x > boss_center.x + profile.seek_grace {
        displacement.x = (target.x - boss_center.x).abs() / profile.seek_lag;
    }

    BossUpdate {
        displacement,
        direction: MovementDirection::None,
        is_attacking: true,
        pattern_change_delay: delay,
        needs_pattern_change: false,
    }
}

/// Generic bounce pattern: cycle through `sequence`, advancing to the
/// next direction whenever the moved hit box crosses a scene edge.
fn bounce(ctx: &BossContext, delay: f64, sequence: &[MovementDirection]) -> BossUpdate {
    let direction = if sequence.contains(&ctx.direction) {
        ctx.direction
    } else {
        sequence[0]
    };

    let displacement = direction_delta(direction, ctx.speed);
    let moved = HitBox::new(ctx.hit_box.min + displacement, ctx.hit_box.max + displacement);

    let next_direction = if hits_edge(&moved, &ctx.bounds, direction) {
        let pos = sequence
            .iter()
            .position(|&d| d == direction)
            .unwrap_or(0);
        sequence[(pos + 1) % sequence.len()]
    } else {
        direction
    };

    BossUpdate {
        displacement,
        direction: next_direction,
        is_attacking: true,
        pattern_change_delay: delay,
        needs_pattern_change: false,
    }
}

/// Has the box reached the scene edge it is traveling toward?
fn hits_edge(hit_box: &HitBox, bounds: &SceneBounds, direction: MovementDirection) -> bool {
    let top = hit_box.min.y < 0.0;
    let bottom = hit_box.max.y > bounds.height;
    let left = hit_box.min.x < 0.0;
    let right = hit_box.max.x > bounds.width;

    match direction {
        MovementDirection::None => false,
        MovementDirection::Up => top,
        MovementDirection::Down => bottom,
        MovementDirection::Left => left,
        MovementDirection::Right => right,
        MovementDirection::UpRight => top || right,
        MovementDirection::DownRight => bottom || right,
        MovementDirection::DownLeft => bottom || left,
        MovementDirection::UpLeft => top || left,
    }
}
