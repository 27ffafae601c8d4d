//! Siege tank stance: ranged-siege versus mobile.

use vanguard_core::commands::{AttackTarget, UnitCommand};
use vanguard_core::constants::*;
use vanguard_core::enums::{AbilityKind, SiegeStance, UnitKind};
use vanguard_core::snapshot::{EnemyUnit, FriendlyUnit};
use vanguard_core::types::Position;

use crate::registry::{enemies_within, StanceController};

/// Pick the stance for a tank at `position` given the enemy snapshot.
///
/// The point-blank rule dominates: an enemy inside `SIEGE_MIN_RANGE` forces
/// mobile even when others sit in the deploy band.
pub fn desired_stance(position: Position, enemies: &[EnemyUnit]) -> SiegeStance {
    let nearby = enemies_within(position, enemies, SIEGE_DEPLOY_RANGE);
    match nearby.first() {
        Some((d, _)) if *d <= SIEGE_MIN_RANGE => SiegeStance::Mobile,
        Some(_) => SiegeStance::Sieged,
        None => SiegeStance::Mobile,
    }
}

pub struct SiegeController;

impl StanceController for SiegeController {
    fn on_dispatch(&self, unit: &FriendlyUnit, enemies: &[EnemyUnit]) -> Vec<UnitCommand> {
        let mut commands = Vec::new();
        let sieged = unit.kind == UnitKind::SiegeTankSieged;

        match desired_stance(unit.position, enemies) {
            SiegeStance::Mobile => {
                if sieged {
                    commands.push(UnitCommand::UseAbility {
                        unit: unit.tag,
                        ability: AbilityKind::Unsiege,
                    });
                }
            }
            SiegeStance::Sieged => {
                if !sieged {
                    commands.push(UnitCommand::UseAbility {
                        unit: unit.tag,
                        ability: AbilityKind::SiegeMode,
                    });
                } else if let Some((_, target)) =
                    enemies_within(unit.position, enemies, SIEGE_FIRE_RANGE).first()
                {
                    // A sieged tank cannot reposition; keep it on a target
                    // every tick while anything is in range.
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
