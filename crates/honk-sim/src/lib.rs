//! Simulation engine for the honk arcade kernel.
//!
//! Owns the sprite pools, runs the tick pipeline (spawn, movement,
//! gameplay, recycle), and produces `SceneSnapshot`s. Completely
//! headless: no timer, renderer, or audio dependency, which keeps the
//! whole engine deterministically testable.

pub mod engine;
pub mod generator;
pub mod pool;
pub mod scene_setup;
pub mod systems;
pub mod threshold;

pub use honk_core as core;
pub use engine::Scene;

#[cfg(test)]
mod tests;
