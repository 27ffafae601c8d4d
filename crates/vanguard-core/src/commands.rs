//! Unit commands produced by the combat core.
//!
//! Commands are fire-and-forget: the core never awaits a result, and a
//! command left over from a previous tick is simply overwritten by the next
//! order issued to the same unit.

use serde::{Deserialize, Serialize};

use crate::enums::AbilityKind;
use crate::types::{Position, UnitTag};

/// Target of an attack order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttackTarget {
    /// Attack-move toward a map position.
    Point(Position),
    /// Attack a specific unit.
    Unit(UnitTag),
}

/// All orders the core can issue to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UnitCommand {
    /// Move without engaging.
    Move { unit: UnitTag, to: Position },
    /// Attack a position or unit.
    Attack { unit: UnitTag, target: AttackTarget },
    /// Trigger an ability (stance morphs). Idempotent downstream: issuing a
    /// mode switch to a unit already in that mode is a no-op.
    UseAbility { unit: UnitTag, ability: AbilityKind },
}

impl UnitCommand {
    /// The unit this command is addressed to.
    pub fn unit(&self) -> UnitTag {
        match self {
            UnitCommand::Move { unit, .. }
            | UnitCommand::Attack { unit, .. }
            | UnitCommand::UseAbility { unit, .. } => *unit,
        }
    }
}
