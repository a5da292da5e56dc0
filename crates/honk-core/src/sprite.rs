//! Pooled sprite state.
//!
//! Sprites are plain data; behavior lives in the engine's systems and
//! dispatches on `kind`. A single flat struct covers every kind;
//! fields a kind does not use stay at their spawn defaults.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::PARK_POSITION;
use crate::enums::{BossMovementPattern, MovementDirection, SpriteKind};
use crate::types::HitBox;

/// One simulated object: a slot in a fixed-capacity pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprite {
    /// Unique id, stable for the whole session.
    pub id: u32,
    pub kind: SpriteKind,
    /// Top-left corner in scene space.
    pub position: DVec2,
    pub size: DVec2,
    /// Added to the scene speed when this sprite drifts.
    pub speed_offset: f64,
    /// Secondary-axis displacement fraction for road drift.
    pub isometric_displacement: f64,
    pub opacity: f64,
    /// Rotation in degrees, for rendering only.
    pub rotation: f64,
    pub scale: f64,
    /// Render layer.
    pub z: i32,
    /// Inactive sprites are parked and invisible to every phase.
    pub active: bool,
    /// Art variant chosen at spawn.
    pub template_index: u32,

    // --- auxiliary per-kind state ---
    /// Health for the player, bosses, and UFO enemies.
    pub health: f64,
    /// Whether this vehicle honks at all this activation.
    pub will_honk: bool,
    /// Ticks until the next honk.
    pub honk_delay: f64,
    /// Ticks until a flying rocket self-blasts; set negative once blasting.
    pub blast_delay: f64,
    /// True once a rocket has blasted and is fading out.
    pub is_blasting: bool,
    /// Boss outer state: approaching (false) or attacking (true).
    pub is_attacking: bool,
    pub movement_pattern: BossMovementPattern,
    pub movement_direction: MovementDirection,
    /// Ticks until the boss reselects a movement pattern.
    pub pattern_change_delay: f64,
    /// Hover oscillation countdown for UFO bosses.
    pub hover_delay: f64,
    /// Parent sprite id for drop shadows.
    pub attached_to: Option<u32>,
    /// Target sprite id for seeking rockets.
    pub seek_target: Option<u32>,
}

impl Sprite {
    /// A parked, inactive slot. Called once per slot at pool pre-fill.
    pub fn parked(id: u32, kind: SpriteKind, size: DVec2, z: i32) -> Self {
        Self {
            id,
            kind,
            position: PARK_POSITION,
            size,
            speed_offset: 0.0,
            isometric_displacement: 0.0,
            opacity: 1.0,
            rotation: 0.0,
            scale: 1.0,
            z,
            active: false,
            template_index: 0,
            health: 0.0,
            will_honk: false,
            honk_delay: 0.0,
            blast_delay: 0.0,
            is_blasting: false,
            is_attacking: false,
            movement_pattern: BossMovementPattern::default(),
            movement_direction: MovementDirection::default(),
            pattern_change_delay: 0.0,
            hover_delay: 0.0,
            attached_to: None,
            seek_target: None,
        }
    }

    /// Park this sprite off-scene and deactivate it.
    pub fn park(&mut self) {
        self.active = false;
        self.position = PARK_POSITION;
    }

    /// Tight contact box.
    pub fn hit_box(&self) -> HitBox {
        HitBox::from_position_size(self.position, self.size)
    }

    /// Enlarged proximity box for targeting.
    pub fn distant_hit_box(&self) -> HitBox {
        self.hit_box().distant()
    }

    pub fn left(&self) -> f64 {
        self.position.x
    }

    pub fn right(&self) -> f64 {
        self.position.x + self.size.x
    }

    pub fn top(&self) -> f64 {
        self.position.y
    }

    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.y
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Fade toward invisibility; clamps at zero.
    pub fn fade(&mut self, step: f64) {
        self.opacity = (self.opacity - step).max(0.0);
    }

    pub fn is_faded(&self) -> bool {
        self.opacity <= 0.0
    }

    /// Switch a rocket into its blasting/fading state.
    pub fn set_blast(&mut self) {
        self.is_blasting = true;
        self.blast_delay = 0.0;
    }
}
