//! Scene snapshot — the complete visible state handed to the renderer
//! after each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{ScenePhase, SpriteKind};
use crate::events::AudioEvent;
use crate::types::SimTime;

/// Complete scene state produced by `Scene::tick`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub time: SimTime,
    pub phase: ScenePhase,
    /// Current global scene speed.
    pub speed: f64,
    pub slow_motion_active: bool,
    pub score: u32,
    pub player: PlayerView,
    /// The active boss, if one is on scene.
    pub boss: Option<BossView>,
    /// Every active sprite, for rendering.
    pub sprites: Vec<SpriteView>,
    /// Audio events accumulated this tick, drained on snapshot.
    pub audio_events: Vec<AudioEvent>,
}

/// Render state for one active sprite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteView {
    pub id: u32,
    pub kind: SpriteKind,
    pub position: DVec2,
    pub size: DVec2,
    pub z: i32,
    pub opacity: f64,
    pub rotation: f64,
    pub scale: f64,
    /// Art variant chosen at spawn.
    pub template_index: u32,
}

/// Player status for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: DVec2,
    pub health: f64,
    /// Remaining power-up charges (seeking rocket ammo).
    pub powerup_charges: u32,
}

/// Boss health bar state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub kind: SpriteKind,
    pub health: f64,
    pub max_health: f64,
    pub is_attacking: bool,
}
