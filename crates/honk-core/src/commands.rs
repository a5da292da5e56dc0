//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start a new game from the main menu or after game over.
    StartGame,
    /// Pause the running scene.
    Pause,
    /// Resume a paused scene.
    Resume,
    /// Return to the main menu, discarding the session.
    Stop,
    /// Analog movement for the current tick, each axis in [-1, 1].
    /// Consumed once by the player update, then cleared.
    SetMovement { dx: f64, dy: f64 },
    /// Request an attack this tick. Consumed once, then cleared.
    Attack,
}
