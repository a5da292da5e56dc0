#[cfg(test)]
mod tests {
    use glam::DVec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use honk_core::constants::*;
    use honk_core::enums::{BossMovementPattern, MovementDirection, SpriteKind};
    use honk_core::types::{HitBox, SceneBounds};

    use crate::fsm::{direction_delta, evaluate, random_pattern, BossContext};
    use crate::profiles::get_profile;

    fn make_context(
        pattern: BossMovementPattern,
        direction: MovementDirection,
        is_attacking: bool,
        position: DVec2,
    ) -> BossContext {
        BossContext {
            kind: SpriteKind::UfoBoss,
            pattern,
            direction,
            is_attacking,
            hit_box: HitBox::from_position_size(position, DVec2::new(200.0, 160.0)),
            bounds: SceneBounds::new(SCENE_WIDTH, SCENE_HEIGHT),
            player_box: HitBox::from_position_size(
                DVec2::new(900.0, 800.0),
                DVec2::new(110.0, 110.0),
            ),
            speed: 5.0,
            pattern_change_delay: 50.0,
        }
    }

    // ---- Outer state: approaching -> attacking ----

    #[test]
    fn test_approach_drifts_bottom_right() {
        let ctx = make_context(
            BossMovementPattern::PlayerSeeking,
            MovementDirection::None,
            false,
            DVec2::new(0.0, 0.0),
        );
        let update = evaluate(&ctx);
        assert!(!update.is_attacking);
        assert_eq!(update.displacement.x, 5.0);
        assert_eq!(update.displacement.y, 5.0 * ISOMETRIC_DISPLACEMENT);
    }

    #[test]
    fn test_approach_flips_to_attacking_past_staging() {
        let staging_x = SCENE_WIDTH * UFO_BOSS_STAGING_FRACTION;
        let ctx = make_context(
            BossMovementPattern::PlayerSeeking,
            MovementDirection::None,
            false,
            DVec2::new(staging_x + 1.0, 200.0),
        );
        let update = evaluate(&ctx);
        assert!(update.is_attacking);
    }

    // ---- Pattern timer ----

    #[test]
    fn test_pattern_timer_elapse_requests_reroll() {
        let mut ctx = make_context(
            BossMovementPattern::RightLeft,
            MovementDirection::Right,
            true,
            DVec2::new(500.0, 300.0),
        );
        ctx.pattern_change_delay = 0.5;
        let update = evaluate(&ctx);
        assert!(update.needs_pattern_change);
        assert_eq!(update.displacement, DVec2::ZERO);
        assert_eq!(update.direction, MovementDirection::None);
    }

    #[test]
    fn test_pattern_timer_decrements_each_tick() {
        let ctx = make_context(
            BossMovementPattern::UpDown,
            MovementDirection::Up,
            true,
            DVec2::new(500.0, 300.0),
        );
        let update = evaluate(&ctx);
        assert!(!update.needs_pattern_change);
        assert_eq!(update.pattern_change_delay, 49.0);
    }

    // ---- Seek ----

    #[test]
    fn test_seek_moves_toward_player() {
        // Boss up-left of the player: both axes should move positive.
        let ctx = make_context(
            BossMovementPattern::PlayerSeeking,
            MovementDirection::None,
            true,
            DVec2::new(100.0, 100.0),
        );
        let update = evaluate(&ctx);
        assert!(update.displacement.x > 0.0);
        assert!(update.displacement.y > 0.0);
    }

    #[test]
    fn test_seek_holds_inside_grace_zone() {
        // Boss centered exactly on the player's top-left corner.
        let ctx = make_context(
            BossMovementPattern::PlayerSeeking,
            MovementDirection::None,
            true,
            DVec2::new(800.0, 720.0),
        );
        let update = evaluate(&ctx);
        assert_eq!(update.displacement, DVec2::ZERO);
    }

    #[test]
    fn test_seek_speed_scales_with_distance() {
        let near = evaluate(&make_context(
            BossMovementPattern::PlayerSeeking,
            MovementDirection::None,
            true,
            DVec2::new(700.0, 700.0),
        ));
        let far = evaluate(&make_context(
            BossMovementPattern::PlayerSeeking,
            MovementDirection::None,
            true,
            DVec2::new(100.0, 100.0),
        ));
        assert!(far.displacement.length() > near.displacement.length());
    }

    // ---- Bounce patterns ----

    #[test]
    fn test_right_left_bounces_at_right_edge() {
        let ctx = make_context(
            BossMovementPattern::RightLeft,
            MovementDirection::Right,
            true,
            DVec2::new(SCENE_WIDTH - 201.0, 300.0),
        );
        let update = evaluate(&ctx);
        assert_eq!(update.direction, MovementDirection::Left);
    }

    #[test]
    fn test_right_left_keeps_direction_mid_scene() {
        let ctx = make_context(
            BossMovementPattern::RightLeft,
            MovementDirection::Right,
            true,
            DVec2::new(500.0, 300.0),
        );
        let update = evaluate(&ctx);
        assert_eq!(update.direction, MovementDirection::Right);
        assert_eq!(update.displacement, direction_delta(MovementDirection::Right, 5.0));
    }

    #[test]
    fn test_isometric_square_cycles_all_four_directions() {
        // Drive a boss around the scene and record visited directions.
        let bounds = SceneBounds::new(SCENE_WIDTH, SCENE_HEIGHT);
        let mut position = DVec2::new(500.0, 300.0);
        let mut direction = MovementDirection::UpRight;
        let mut visited = Vec::new();

        for _ in 0..3000 {
            let mut ctx = make_context(
                BossMovementPattern::IsometricSquare,
                direction,
                true,
                position,
            );
            ctx.bounds = bounds;
            ctx.pattern_change_delay = 10_000.0;
            let update = evaluate(&ctx);
            position += update.displacement;
            direction = update.direction;
            if !visited.contains(&direction) {
                visited.push(direction);
            }
        }

        for expected in [
            MovementDirection::UpRight,
            MovementDirection::DownRight,
            MovementDirection::DownLeft,
            MovementDirection::UpLeft,
        ] {
            assert!(visited.contains(&expected), "never entered {expected:?}");
        }
    }

    #[test]
    fn test_bounce_recovers_from_stale_direction() {
        // A direction outside the pattern's sequence resets to the first.
        let ctx = make_context(
            BossMovementPattern::UpDown,
            MovementDirection::DownLeft,
            true,
            DVec2::new(500.0, 500.0),
        );
        let update = evaluate(&ctx);
        assert_eq!(update.displacement, direction_delta(MovementDirection::Up, 5.0));
    }

    // ---- Profiles and pattern selection ----

    #[test]
    fn test_random_pattern_stays_in_profile() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let profile = get_profile(SpriteKind::VehicleBoss);
        for _ in 0..50 {
            let (pattern, delay) = random_pattern(SpriteKind::VehicleBoss, &mut rng);
            assert!(profile.patterns.contains(&pattern));
            assert!(delay >= BOSS_PATTERN_CHANGE_MIN && delay < BOSS_PATTERN_CHANGE_MAX);
        }
    }

    #[test]
    fn test_vehicle_boss_is_road_bound() {
        let profile = get_profile(SpriteKind::VehicleBoss);
        assert_eq!(profile.patterns, &[BossMovementPattern::RightLeft]);
        assert_eq!(profile.hover_speed, 0.0);
    }

    #[test]
    fn test_ufo_boss_has_all_patterns() {
        let profile = get_profile(SpriteKind::UfoBoss);
        assert_eq!(profile.patterns.len(), 6);
        assert!(profile.hover_speed > 0.0);
    }
}
