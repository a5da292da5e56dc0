//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Kind tag for every pooled sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Vehicle,
    RoadMark,
    RoadSideTree,
    RoadSideHedge,
    RoadSideLamp,
    RoadSideBillboard,
    Cloud,
    Honk,
    PlayerRocket,
    PlayerFireCracker,
    PlayerRocketSeeking,
    UfoEnemy,
    UfoEnemyRocket,
    UfoBoss,
    UfoBossRocket,
    UfoBossRocketSeeking,
    VehicleBoss,
    VehicleBossRocket,
    HealthPickup,
    PowerUpPickup,
    DropShadow,
}

impl SpriteKind {
    /// Every kind, in pool order. Pool indices follow this ordering.
    pub const ALL: [SpriteKind; 22] = [
        SpriteKind::Player,
        SpriteKind::Vehicle,
        SpriteKind::RoadMark,
        SpriteKind::RoadSideTree,
        SpriteKind::RoadSideHedge,
        SpriteKind::RoadSideLamp,
        SpriteKind::RoadSideBillboard,
        SpriteKind::Cloud,
        SpriteKind::Honk,
        SpriteKind::PlayerRocket,
        SpriteKind::PlayerFireCracker,
        SpriteKind::PlayerRocketSeeking,
        SpriteKind::UfoEnemy,
        SpriteKind::UfoEnemyRocket,
        SpriteKind::UfoBoss,
        SpriteKind::UfoBossRocket,
        SpriteKind::UfoBossRocketSeeking,
        SpriteKind::VehicleBoss,
        SpriteKind::VehicleBossRocket,
        SpriteKind::HealthPickup,
        SpriteKind::PowerUpPickup,
        SpriteKind::DropShadow,
    ];

    /// Index of this kind in [`SpriteKind::ALL`].
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|&k| k == self)
            .expect("kind present in ALL")
    }

    pub fn is_boss(self) -> bool {
        matches!(self, SpriteKind::UfoBoss | SpriteKind::VehicleBoss)
    }
}

/// Top-level scene state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenePhase {
    #[default]
    MainMenu,
    Running,
    Paused,
    GameOver,
}

/// Directional sub-state for bounce movement patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementDirection {
    #[default]
    None,
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

/// Named boss movement patterns, reselected randomly on a timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossMovementPattern {
    #[default]
    PlayerSeeking,
    IsometricSquare,
    UpRightDownLeft,
    UpLeftDownRight,
    RightLeft,
    UpDown,
}
