//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::DT;

/// Axis-aligned hit box in scene space.
///
/// All collision variants (close, distant, horizontal) derive from the
/// same rectangle through one parameterized inflation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HitBox {
    /// Top-left corner.
    pub min: DVec2,
    /// Bottom-right corner.
    pub max: DVec2,
}

impl HitBox {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Build from a sprite's top-left position and size.
    pub fn from_position_size(position: DVec2, size: DVec2) -> Self {
        Self {
            min: position,
            max: position + size,
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Grow (or shrink, with negative margins) by `margin` on each side.
    pub fn inflate(&self, margin: DVec2) -> Self {
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    /// The enlarged proximity box: inflated by half the size per axis.
    pub fn distant(&self) -> Self {
        self.inflate(DVec2::new(self.width() * 0.5, self.height() * 0.5))
    }

    /// Standard AABB overlap test.
    pub fn intersects(&self, other: &HitBox) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Lane-overlap test: x-interval intersection only, y masked out.
    pub fn intersects_horizontally(&self, other: &HitBox) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x
    }
}

/// Scene dimensions in design-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneBounds {
    pub width: f64,
    pub height: f64,
}

impl SceneBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn as_hit_box(&self) -> HitBox {
        HitBox::new(DVec2::ZERO, DVec2::new(self.width, self.height))
    }

    /// True when the box lies entirely beyond any scene edge.
    /// This is the single off-screen rule used by the recycle phase.
    pub fn is_fully_outside(&self, hit_box: &HitBox) -> bool {
        hit_box.max.x < 0.0
            || hit_box.min.x > self.width
            || hit_box.max.y < 0.0
            || hit_box.min.y > self.height
    }
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self::new(
            crate::constants::SCENE_WIDTH,
            crate::constants::SCENE_HEIGHT,
        )
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += DT;
    }
}
