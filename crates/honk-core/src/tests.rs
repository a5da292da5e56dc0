#[cfg(test)]
mod tests {
    use glam::DVec2;

    use crate::constants::*;
    use crate::enums::*;
    use crate::events::AudioEvent;
    use crate::sprite::Sprite;
    use crate::state::SceneSnapshot;
    use crate::templates::{require_template, template, SetupError};
    use crate::types::{HitBox, SceneBounds, SimTime};

    /// Verify the enums round-trip through serde_json.
    #[test]
    fn test_sprite_kind_serde() {
        for kind in SpriteKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            let back: SpriteKind = serde_json::from_str(&json).unwrap();
            assert_eq!(kind, back);
        }
    }

    #[test]
    fn test_scene_phase_serde() {
        let variants = vec![
            ScenePhase::MainMenu,
            ScenePhase::Running,
            ScenePhase::Paused,
            ScenePhase::GameOver,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: ScenePhase = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_audio_event_serde() {
        let events = vec![
            AudioEvent::Honk,
            AudioEvent::RocketLaunch {
                kind: SpriteKind::PlayerRocket,
            },
            AudioEvent::Blast {
                kind: SpriteKind::Vehicle,
            },
            AudioEvent::BossEntry {
                kind: SpriteKind::UfoBoss,
            },
            AudioEvent::BossDead {
                kind: SpriteKind::VehicleBoss,
            },
            AudioEvent::PlayerHit,
            AudioEvent::PickupCollected {
                kind: SpriteKind::HealthPickup,
            },
            AudioEvent::GameOver,
        ];
        for e in events {
            let json = serde_json::to_string(&e).unwrap();
            let back: AudioEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(e, back);
        }
    }

    #[test]
    fn test_snapshot_default_serde() {
        let snapshot = SceneSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SceneSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sprites.len(), 0);
        assert_eq!(back.phase, ScenePhase::MainMenu);
    }

    // ---- Kind table ----

    #[test]
    fn test_kind_index_matches_all_ordering() {
        for (i, kind) in SpriteKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_every_kind_has_a_template() {
        for kind in SpriteKind::ALL {
            let t = require_template(kind).unwrap();
            assert!(t.capacity > 0, "{kind:?} needs a nonzero capacity");
            assert!(t.variants > 0, "{kind:?} needs at least one variant");
            assert!(t.width > 0.0 && t.height > 0.0);
        }
    }

    #[test]
    fn test_player_pool_is_single_slot() {
        assert_eq!(template(SpriteKind::Player).unwrap().capacity, 1);
    }

    #[test]
    fn test_setup_error_display() {
        let err = SetupError::MissingTemplate(SpriteKind::Cloud);
        assert!(err.to_string().contains("Cloud"));
    }

    // ---- Hit boxes ----

    #[test]
    fn test_hit_box_overlap() {
        let a = HitBox::from_position_size(DVec2::new(0.0, 0.0), DVec2::new(100.0, 100.0));
        let b = HitBox::from_position_size(DVec2::new(50.0, 50.0), DVec2::new(100.0, 100.0));
        let c = HitBox::from_position_size(DVec2::new(200.0, 0.0), DVec2::new(50.0, 50.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_hit_box_touching_edges_do_not_intersect() {
        let a = HitBox::from_position_size(DVec2::new(0.0, 0.0), DVec2::new(100.0, 100.0));
        let b = HitBox::from_position_size(DVec2::new(100.0, 0.0), DVec2::new(100.0, 100.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_distant_box_is_inflated_by_half_size() {
        let a = HitBox::from_position_size(DVec2::new(100.0, 100.0), DVec2::new(100.0, 40.0));
        let d = a.distant();
        assert_eq!(d.min, DVec2::new(50.0, 80.0));
        assert_eq!(d.max, DVec2::new(250.0, 160.0));
    }

    #[test]
    fn test_horizontal_overlap_ignores_y() {
        let a = HitBox::from_position_size(DVec2::new(0.0, 0.0), DVec2::new(100.0, 50.0));
        let b = HitBox::from_position_size(DVec2::new(50.0, 900.0), DVec2::new(100.0, 50.0));
        assert!(!a.intersects(&b));
        assert!(a.intersects_horizontally(&b));
    }

    #[test]
    fn test_parked_sprite_cannot_touch_the_scene() {
        let bounds = SceneBounds::default();
        let sprite = Sprite::parked(0, SpriteKind::Vehicle, DVec2::new(170.0, 120.0), 4);
        assert!(!sprite.hit_box().intersects(&bounds.as_hit_box()));
        assert!(!sprite.distant_hit_box().intersects(&bounds.as_hit_box()));
        assert!(bounds.is_fully_outside(&sprite.hit_box()));
    }

    #[test]
    fn test_off_screen_rule_is_symmetric() {
        let bounds = SceneBounds::new(1920.0, 1080.0);
        let size = DVec2::new(100.0, 100.0);
        // Fully past each edge
        for pos in [
            DVec2::new(-101.0, 500.0),
            DVec2::new(1921.0, 500.0),
            DVec2::new(500.0, -101.0),
            DVec2::new(500.0, 1081.0),
        ] {
            let hb = HitBox::from_position_size(pos, size);
            assert!(bounds.is_fully_outside(&hb), "{pos:?} should be outside");
        }
        // Straddling an edge is still on scene
        let hb = HitBox::from_position_size(DVec2::new(-50.0, 500.0), size);
        assert!(!bounds.is_fully_outside(&hb));
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..10 {
            time.advance();
        }
        assert_eq!(time.tick, 10);
        assert!((time.elapsed_secs - 10.0 * DT).abs() < 1e-12);
    }

    #[test]
    fn test_sprite_fade_clamps_at_zero() {
        let mut sprite = Sprite::parked(0, SpriteKind::Honk, DVec2::new(60.0, 60.0), 5);
        for _ in 0..100 {
            sprite.fade(HONK_FADE_STEP);
        }
        assert_eq!(sprite.opacity, 0.0);
        assert!(sprite.is_faded());
    }
}
