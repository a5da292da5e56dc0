//! Boss movement AI for the honk arcade kernel.
//!
//! Implements the nested boss movement state machine (approach/attack
//! outer state, directional bounce inner state) and per-boss behavior
//! profiles. Pure functions over plain data — no engine dependency.

pub mod fsm;
pub mod profiles;

pub use honk_core as core;

#[cfg(test)]
mod tests;
