//! Core types and definitions for the honk arcade simulation kernel.
//!
//! This crate defines the vocabulary shared across all other crates:
//! sprite state, commands, snapshots, events, templates, and constants.
//! It has no dependency on any timer, renderer, or audio runtime.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod events;
pub mod sprite;
pub mod state;
pub mod templates;
pub mod types;

#[cfg(test)]
mod tests;
