//! Sprite placement factories for session start and spawning.
//!
//! Entry positions put sprites just off the top or left scene edge so
//! the road drift carries them across the visible area. Bosses get
//! their health, pattern, and shadow here.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use honk_core::constants::*;
use honk_core::enums::SpriteKind;
use honk_core::types::SceneBounds;

use crate::pool::Pools;

/// Start a fresh session: park everything, then spawn the player and
/// their drop shadow at the resting position.
pub fn setup_session(pools: &mut Pools, rng: &mut ChaCha8Rng, bounds: &SceneBounds) {
    pools.park_all();
    let player_id = spawn_player(pools, rng, bounds);
    if let Some(id) = player_id {
        attach_drop_shadow(pools, rng, id);
    }
}

/// Spawn the player at the lower-middle resting position.
pub fn spawn_player(
    pools: &mut Pools,
    rng: &mut ChaCha8Rng,
    bounds: &SceneBounds,
) -> Option<u32> {
    let pool = pools.get_mut(SpriteKind::Player);
    let sprite = pool.acquire(rng)?;
    sprite.position = DVec2::new(
        bounds.width * 0.5 - sprite.size.x * 0.5,
        bounds.height * 0.7,
    );
    Some(sprite.id)
}

/// Attach a drop shadow under a parent sprite. Silently skipped when
/// the shadow pool is exhausted.
pub fn attach_drop_shadow(pools: &mut Pools, rng: &mut ChaCha8Rng, parent_id: u32) {
    let parent = pools
        .iter()
        .flat_map(|p| p.iter_active())
        .find(|s| s.id == parent_id)
        .map(|s| (s.position, s.size));
    let Some((position, size)) = parent else {
        return;
    };

    let pool = pools.get_mut(SpriteKind::DropShadow);
    if let Some(shadow) = pool.acquire(rng) {
        shadow.attached_to = Some(parent_id);
        shadow.position = DVec2::new(
            position.x + size.x * 0.5 - shadow.size.x * 0.5,
            position.y + size.y + DROP_SHADOW_DISTANCE,
        );
    }
}

/// Entry position for an ambient or enemy sprite of the given kind and
/// size. Road-bound sprites enter from the top or left edge so the
/// bottom-right drift sweeps them across the scene.
pub fn entry_position(
    kind: SpriteKind,
    size: DVec2,
    rng: &mut ChaCha8Rng,
    bounds: &SceneBounds,
) -> DVec2 {
    match kind {
        SpriteKind::Vehicle => DVec2::new(rng.gen_range(0.0..bounds.width * 0.5), -size.y),
        SpriteKind::RoadMark => DVec2::new(rng.gen_range(0.0..bounds.width * 0.6), -size.y),
        SpriteKind::RoadSideTree
        | SpriteKind::RoadSideHedge
        | SpriteKind::RoadSideLamp
        | SpriteKind::RoadSideBillboard => {
            // Alternate between the two road sides: top edge or left edge.
            if rng.gen_bool(0.5) {
                DVec2::new(rng.gen_range(bounds.width * 0.1..bounds.width * 0.7), -size.y)
            } else {
                DVec2::new(-size.x, rng.gen_range(0.0..bounds.height * 0.5))
            }
        }
        SpriteKind::Cloud => DVec2::new(
            rng.gen_range(0.0..bounds.width * 0.3),
            rng.gen_range(0.0..bounds.height * 0.3),
        ),
        SpriteKind::UfoEnemy => DVec2::new(rng.gen_range(0.0..bounds.width * 0.5), -size.y),
        SpriteKind::UfoBoss => DVec2::new(rng.gen_range(0.0..bounds.width * 0.2), -size.y),
        SpriteKind::VehicleBoss => DVec2::new(-size.x, rng.gen_range(0.0..bounds.height * 0.3)),
        SpriteKind::HealthPickup | SpriteKind::PowerUpPickup => {
            DVec2::new(rng.gen_range(0.0..bounds.width * 0.5), -size.y)
        }
        // Projectiles, honks, and shadows spawn relative to another
        // sprite, never from an edge.
        _ => DVec2::new(rng.gen_range(0.0..bounds.width), -size.y),
    }
}
