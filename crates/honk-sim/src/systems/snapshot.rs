//! Snapshot system: builds a complete `SceneSnapshot` from the pools.
//!
//! Read-only over the pools; the engine hands in the drained audio
//! events and the scalar session state.

use honk_core::enums::{ScenePhase, SpriteKind};
use honk_core::events::AudioEvent;
use honk_core::state::{BossView, PlayerView, SceneSnapshot, SpriteView};
use honk_core::types::SimTime;

use crate::pool::Pools;

pub struct SnapshotInput {
    pub time: SimTime,
    pub phase: ScenePhase,
    pub speed: f64,
    pub slow_motion_active: bool,
    pub score: u32,
    pub powerup_charges: u32,
    pub boss_max_health: f64,
    pub audio_events: Vec<AudioEvent>,
}

pub fn build_snapshot(pools: &Pools, input: SnapshotInput) -> SceneSnapshot {
    SceneSnapshot {
        time: input.time,
        phase: input.phase,
        speed: input.speed,
        slow_motion_active: input.slow_motion_active,
        score: input.score,
        player: build_player(pools, input.powerup_charges),
        boss: build_boss(pools, input.boss_max_health),
        sprites: build_sprites(pools),
        audio_events: input.audio_events,
    }
}

fn build_player(pools: &Pools, powerup_charges: u32) -> PlayerView {
    pools
        .player()
        .map(|p| PlayerView {
            position: p.position,
            health: p.health.max(0.0),
            powerup_charges,
        })
        .unwrap_or_default()
}

fn build_boss(pools: &Pools, max_health: f64) -> Option<BossView> {
    [SpriteKind::UfoBoss, SpriteKind::VehicleBoss]
        .into_iter()
        .find_map(|kind| pools.get(kind).first_active())
        .map(|boss| BossView {
            kind: boss.kind,
            health: boss.health.max(0.0),
            max_health,
            is_attacking: boss.is_attacking,
        })
}

/// Every active sprite, sorted by render layer then id for a stable
/// draw order.
fn build_sprites(pools: &Pools) -> Vec<SpriteView> {
    let mut sprites: Vec<SpriteView> = pools
        .iter()
        .flat_map(|p| p.iter_active())
        .map(|s| SpriteView {
            id: s.id,
            kind: s.kind,
            position: s.position,
            size: s.size,
            z: s.z,
            opacity: s.opacity,
            rotation: s.rotation,
            scale: s.scale,
            template_index: s.template_index,
        })
        .collect();

    sprites.sort_by_key(|s| (s.z, s.id));
    sprites
}
