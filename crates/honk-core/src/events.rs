//! Events emitted by the simulation for the external audio facility.
//!
//! Fire-and-forget: the kernel never learns about playback completion.

use serde::{Deserialize, Serialize};

use crate::enums::SpriteKind;

/// Audio events drained from the scene after each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A vehicle or enemy honked.
    Honk,
    /// A rocket or firecracker left its launcher.
    RocketLaunch { kind: SpriteKind },
    /// Something blew up.
    Blast { kind: SpriteKind },
    /// A boss entered the scene.
    BossEntry { kind: SpriteKind },
    /// A boss was destroyed.
    BossDead { kind: SpriteKind },
    /// The player took a hit.
    PlayerHit,
    /// The player collected a pickup.
    PickupCollected { kind: SpriteKind },
    /// Player health reached zero.
    GameOver,
}
