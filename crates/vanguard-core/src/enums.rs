//! Enumeration types used throughout the combat core.

use serde::{Deserialize, Serialize};

/// Unit and structure archetypes.
///
/// Mode pairs (`SiegeTank`/`SiegeTankSieged`, `ValkyrieFighter`/
/// `ValkyrieAssault`) are distinct kinds because the engine reports a
/// morphed unit as a different type; the tag stays the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    // --- Economy ---
    Worker,
    Hauler,

    // --- Combat ---
    Trooper,
    SiegeTank,
    SiegeTankSieged,
    /// Valkyrie in air-intercept configuration (flying, anti-air).
    ValkyrieFighter,
    /// Valkyrie landed in ground-support configuration.
    ValkyrieAssault,

    // --- Structures ---
    CommandPost,
    SupplyDepot,
    Barracks,
    Factory,
    Starport,
}

impl UnitKind {
    pub fn is_structure(self) -> bool {
        matches!(
            self,
            UnitKind::CommandPost
                | UnitKind::SupplyDepot
                | UnitKind::Barracks
                | UnitKind::Factory
                | UnitKind::Starport
        )
    }

    pub fn is_flying(self) -> bool {
        matches!(self, UnitKind::ValkyrieFighter)
    }
}

/// Abilities the core may command on a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Siege tank: deploy into immobile siege configuration.
    SiegeMode,
    /// Siege tank: return to mobile configuration.
    Unsiege,
    /// Valkyrie: morph to the flying air-intercept configuration.
    FighterMode,
    /// Valkyrie: land into the ground-support configuration.
    AssaultMode,
}

/// Siege tank stance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiegeStance {
    #[default]
    Mobile,
    Sieged,
}

/// Valkyrie stance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValkyrieStance {
    AirIntercept,
    #[default]
    GroundSupport,
}
