//! Dispatch from unit kind to its stance controller.

use vanguard_core::commands::UnitCommand;
use vanguard_core::enums::UnitKind;
use vanguard_core::snapshot::{EnemyUnit, FriendlyUnit};

use crate::siege::SiegeController;
use crate::valkyrie::ValkyrieController;

/// A local combat-mode state machine for one family of unit kinds.
pub trait StanceController: Sync {
    /// Invoked whenever the unit is dispatched to engage. `enemies` is the
    /// full enemy snapshot; entries without a resolved position are
    /// invisible to stance logic.
    fn on_dispatch(&self, unit: &FriendlyUnit, enemies: &[EnemyUnit]) -> Vec<UnitCommand>;
}

static SIEGE: SiegeController = SiegeController;
static VALKYRIE: ValkyrieController = ValkyrieController;

/// Look up the stance controller for a unit kind. Kinds without a local
/// state machine (troopers, economy units) return `None` and keep whatever
/// order dispatched them.
pub fn controller_for(kind: UnitKind) -> Option<&'static dyn StanceController> {
    match kind {
        UnitKind::SiegeTank | UnitKind::SiegeTankSieged => Some(&SIEGE),
        UnitKind::ValkyrieFighter | UnitKind::ValkyrieAssault => Some(&VALKYRIE),
        _ => None,
    }
}

/// Enemies that are alive, position-resolved, and within `range` of `from`,
/// paired with their distance. Shared helper for the concrete controllers.
pub(crate) fn enemies_within(
    from: vanguard_core::types::Position,
    enemies: &[EnemyUnit],
    range: f64,
) -> Vec<(f64, &EnemyUnit)> {
    let mut hits: Vec<(f64, &EnemyUnit)> = enemies
        .iter()
        .filter(|e| e.alive)
        .filter_map(|e| e.position.map(|p| (from.distance_to(&p), e)))
        .filter(|(d, _)| *d <= range)
        .collect();
    hits.sort_by(|a, b| a.0.total_cmp(&b.0));
    hits
}
