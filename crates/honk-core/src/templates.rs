//! Static sprite template table.
//!
//! Stands in for the external asset tables: per kind, the default
//! size, the number of art variants a renderer may choose from, the
//! pool capacity, and the z layer. A kind with no template entry is a
//! fatal configuration error surfaced at pool pre-fill time.

use std::fmt;

use glam::DVec2;

use crate::enums::SpriteKind;

/// Design-time configuration for one sprite kind.
#[derive(Debug, Clone, Copy)]
pub struct SpriteTemplate {
    pub kind: SpriteKind,
    /// Default width and height in design-space pixels.
    pub width: f64,
    pub height: f64,
    /// Number of art variants; spawn picks one at random.
    pub variants: u32,
    /// Fixed pool capacity: upper bound on simultaneous instances.
    pub capacity: usize,
    /// Render layer.
    pub z: i32,
}

impl SpriteTemplate {
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

macro_rules! template {
    ($kind:ident, $w:expr, $h:expr, $variants:expr, $capacity:expr, $z:expr) => {
        SpriteTemplate {
            kind: SpriteKind::$kind,
            width: $w,
            height: $h,
            variants: $variants,
            capacity: $capacity,
            z: $z,
        }
    };
}

/// The complete template table. Capacity bounds the simultaneous
/// instances per kind; sizes are design-space defaults.
pub const SPRITE_TEMPLATES: &[SpriteTemplate] = &[
    template!(Player, 110.0, 110.0, 2, 1, 8),
    template!(Vehicle, 170.0, 120.0, 10, 8, 4),
    template!(RoadMark, 30.0, 30.0, 1, 10, 1),
    template!(RoadSideTree, 80.0, 130.0, 2, 10, 3),
    template!(RoadSideHedge, 120.0, 90.0, 3, 11, 2),
    template!(RoadSideLamp, 60.0, 140.0, 2, 6, 3),
    template!(RoadSideBillboard, 180.0, 150.0, 3, 3, 3),
    template!(Cloud, 140.0, 80.0, 3, 5, 10),
    template!(Honk, 60.0, 60.0, 3, 10, 5),
    template!(PlayerRocket, 50.0, 50.0, 1, 4, 7),
    template!(PlayerFireCracker, 40.0, 40.0, 1, 4, 7),
    template!(PlayerRocketSeeking, 50.0, 50.0, 1, 2, 7),
    template!(UfoEnemy, 120.0, 100.0, 4, 7, 6),
    template!(UfoEnemyRocket, 40.0, 40.0, 1, 8, 6),
    template!(UfoBoss, 200.0, 160.0, 3, 3, 6),
    template!(UfoBossRocket, 60.0, 60.0, 1, 4, 6),
    template!(UfoBossRocketSeeking, 60.0, 60.0, 1, 2, 6),
    template!(VehicleBoss, 180.0, 130.0, 2, 3, 4),
    template!(VehicleBossRocket, 60.0, 60.0, 1, 4, 5),
    template!(HealthPickup, 70.0, 70.0, 1, 3, 6),
    template!(PowerUpPickup, 70.0, 70.0, 2, 3, 6),
    template!(DropShadow, 90.0, 25.0, 1, 4, 0),
];

/// Fatal configuration error raised at scene setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// No template configured for the given kind.
    MissingTemplate(SpriteKind),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::MissingTemplate(kind) => {
                write!(f, "no sprite template configured for {kind:?}")
            }
        }
    }
}

impl std::error::Error for SetupError {}

/// Look up the template for a kind.
pub fn template(kind: SpriteKind) -> Option<&'static SpriteTemplate> {
    SPRITE_TEMPLATES.iter().find(|t| t.kind == kind)
}

/// Look up the template for a kind, failing fast if absent.
pub fn require_template(kind: SpriteKind) -> Result<&'static SpriteTemplate, SetupError> {
    template(kind).ok_or(SetupError::MissingTemplate(kind))
}
