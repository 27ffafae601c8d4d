//! Core types and definitions for the VANGUARD combat-decision core.
//!
//! This crate defines the vocabulary shared across all other crates:
//! snapshots, commands, events, enums, and tuning constants.
//! It has no dependency on any runtime framework or game-engine binding.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod events;
pub mod snapshot;
pub mod types;
