//! Recycle system: returns finished sprites to their pools.
//!
//! One uniform off-screen rule for every kind: a sprite recycles when
//! its close hit box lies entirely beyond any scene edge. On top of
//! that, faded sprites (spent honks, blasted rockets and vehicles,
//! destroyed enemies), fully shrunk dead bosses, and orphaned drop
//! shadows are collected. The player is never recycled here; the
//! session owns that sprite.

use honk_core::enums::SpriteKind;
use honk_core::types::SceneBounds;

use crate::pool::Pools;

/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(pools: &mut Pools, bounds: &SceneBounds, buffer: &mut Vec<(SpriteKind, u32)>) {
    buffer.clear();

    let active_ids: Vec<u32> = pools
        .iter()
        .filter(|p| p.kind() != SpriteKind::DropShadow)
        .flat_map(|p| p.iter_active())
        .map(|s| s.id)
        .collect();

    for pool in pools.iter() {
        let kind = pool.kind();
        if kind == SpriteKind::Player {
            continue;
        }
        for sprite in pool.iter_active() {
            let finished = match kind {
                SpriteKind::DropShadow => sprite
                    .attached_to
                    .map(|parent| !active_ids.contains(&parent))
                    .unwrap_or(true),
                kind if kind.is_boss() => {
                    (sprite.is_dead() && sprite.scale <= 0.0)
                        || bounds.is_fully_outside(&sprite.hit_box())
                }
                _ => sprite.is_faded() || bounds.is_fully_outside(&sprite.hit_box()),
            };
            if finished {
                buffer.push((kind, sprite.id));
            }
        }
    }

    for (kind, id) in buffer.drain(..) {
        pools.get_mut(kind).release(id);
    }
}
