//! Per-tick read-only game state consumed by the combat core.
//!
//! Snapshot rows are plain data owned by the upstream bookkeeping layer.
//! The core never mutates them; all decisions come out as commands.

use serde::{Deserialize, Serialize};

use crate::enums::UnitKind;
use crate::types::{Position, UnitTag};

/// A friendly unit as reported by the engine this tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FriendlyUnit {
    pub tag: UnitTag,
    pub kind: UnitKind,
    pub position: Position,
    pub alive: bool,
}

/// An enemy unit or structure. May be a stale "last seen" record for
/// enemies currently out of vision; `position` is `None` when the sighting
/// could not be resolved to a map location.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyUnit {
    pub tag: UnitTag,
    pub kind: UnitKind,
    pub position: Option<Position>,
    /// Ground attack range (0 for unarmed units and most structures).
    pub ground_range: f64,
    pub is_flying: bool,
    pub is_structure: bool,
    pub alive: bool,
}

/// An owned structure (defense perimeter anchor).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OwnStructure {
    pub tag: UnitTag,
    pub kind: UnitKind,
    pub position: Position,
}

/// Complete read-only input for one tick of the combat core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub friendly_units: Vec<FriendlyUnit>,
    /// Tracked enemy units and structures, possibly stale.
    pub enemy_units: Vec<EnemyUnit>,
    pub own_structures: Vec<OwnStructure>,
    /// The player's start location.
    pub home_base: Position,
    pub map_center: Position,
    /// The enemy's known start location (push fallback target).
    pub enemy_start: Position,
    /// Expansion location table, used once for rally-point initialization.
    pub expansion_locations: Vec<Position>,
}

impl Default for FriendlyUnit {
    fn default() -> Self {
        Self {
            tag: 0,
            kind: UnitKind::Trooper,
            position: Position::default(),
            alive: true,
        }
    }
}

impl Default for EnemyUnit {
    fn default() -> Self {
        Self {
            tag: 0,
            kind: UnitKind::Trooper,
            position: Some(Position::default()),
            ground_range: 5.0,
            is_flying: false,
            is_structure: false,
            alive: true,
        }
    }
}
