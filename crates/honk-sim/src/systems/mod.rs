//! Tick-pipeline systems, one module per phase.
//!
//! Systems are free functions over the pools plus the scene state they
//! need. The engine runs them in a fixed order every tick: spawn,
//! movement, gameplay, recycle. Nothing here owns state.

pub mod gameplay;
pub mod movement;
pub mod recycle;
pub mod snapshot;
pub mod spawn;
