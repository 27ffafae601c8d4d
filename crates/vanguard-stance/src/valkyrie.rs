//! Valkyrie stance: air-intercept versus ground-support.

use vanguard_core::commands::{AttackTarget, UnitCommand};
use vanguard_core::constants::VALKYRIE_ENGAGE_RANGE;
use vanguard_core::enums::{AbilityKind, UnitKind, ValkyrieStance};
use vanguard_core::snapshot::{EnemyUnit, FriendlyUnit};
use vanguard_core::types::Position;

use crate::registry::{enemies_within, StanceController};

/// Pick the stance for a valkyrie at `position`. Flyers in range win over
/// ground targets; with nothing in range the valkyrie defaults to
/// ground-support.
pub fn desired_stance(position: Position, enemies: &[EnemyUnit]) -> ValkyrieStance {
    let nearby = enemies_within(position, enemies, VALKYRIE_ENGAGE_RANGE);
    if nearby.iter().any(|(_, e)| e.is_flying) {
        ValkyrieStance::AirIntercept
    } else {
        ValkyrieStance::GroundSupport
    }
}

pub struct ValkyrieController;

impl StanceController for ValkyrieController {
    fn on_dispatch(&self, unit: &FriendlyUnit, enemies: &[EnemyUnit]) -> Vec<UnitCommand> {
        let mut commands = Vec::new();
        let nearby = enemies_within(unit.position, enemies, VALKYRIE_ENGAGE_RANGE);
        let in_fighter_mode = unit.kind == UnitKind::ValkyrieFighter;

        match desired_stance(unit.position, enemies) {
            ValkyrieStance::AirIntercept => {
                if !in_fighter_mode {
                    commands.push(UnitCommand::UseAbility {
                        unit: unit.tag,
                        ability: AbilityKind::FighterMode,
                    });
                }
                if let Some((_, target)) = nearby.iter().find(|(_, e)| e.is_flying) {
                    commands.push(UnitCommand::Attack {
                        unit: unit.tag,
                        target: AttackTarget::Unit(target.tag),
                    });
                }
            }
            ValkyrieStance::GroundSupport => {
                if in_fighter_mode {
                    commands.push(UnitCommand::UseAbility {
                        unit: unit.tag,
                        ability: AbilityKind::AssaultMode,
                    });
                }
                if let Some((_, target)) = nearby.iter().find(|(_, e)| !e.is_flying) {
                    commands.push(UnitCommand::Attack {
                        unit: unit.tag,
                        target: AttackTarget::Unit(target.tag),
                    });
                }
            }
        }

        commands
    }
}
