//! Army controller — the per-tick orchestrator.
//!
//! Owns all mutable tactical state for one match: the attack/hold flag, the
//! rally point, and the engagement cache. Constructed explicitly per match;
//! there are no ambient globals. Everything runs in the single tick context,
//! so no locking is involved.

use std::collections::{BTreeSet, HashSet};

use vanguard_core::commands::{AttackTarget, UnitCommand};
use vanguard_core::constants::*;
use vanguard_core::enums::UnitKind;
use vanguard_core::events::TacticalEvent;
use vanguard_core::snapshot::{FriendlyUnit, GameSnapshot};
use vanguard_core::types::{Position, UnitTag};

use vanguard_stance::controller_for;

use crate::allocator::{allocate, AllocationPath};
use crate::detector::detect_threat;
use crate::engagement::EngagementCache;
use crate::oracle::{eval_or_assume_loss, CombatOracle};

/// Everything one tick produces: fire-and-forget unit orders plus decision
/// telemetry.
#[derive(Debug, Default)]
pub struct TickOutput {
    pub commands: Vec<UnitCommand>,
    pub events: Vec<TacticalEvent>,
}

/// The top-level combat decision loop.
pub struct ArmyController {
    oracle: Box<dyn CombatOracle>,
    /// Unit kinds that never count toward the army (economy units).
    exclusion: HashSet<UnitKind>,
    cache: EngagementCache,
    attacking: bool,
    rally_point: Position,
}

/// The default exclusion set: economy kinds sit out every fight.
pub fn default_exclusions() -> HashSet<UnitKind> {
    [UnitKind::Worker, UnitKind::Hauler].into_iter().collect()
}

impl ArmyController {
    /// Build a controller for a match. The initial snapshot is only used to
    /// compute the rally point; it is not retained.
    pub fn new(
        oracle: Box<dyn CombatOracle>,
        exclusion: HashSet<UnitKind>,
        initial: &GameSnapshot,
    ) -> Self {
        Self {
            oracle,
            exclusion,
            cache: EngagementCache::new(),
            attacking: false,
            rally_point: initial_rally_point(initial),
        }
    }

    pub fn attacking(&self) -> bool {
        self.attacking
    }

    pub fn rally_point(&self) -> Position {
        self.rally_point
    }

    pub fn cache(&self) -> &EngagementCache {
        &self.cache
    }

    /// Run one tick: global posture first, then local defense. The two are
    /// independent — a retreating army still defends its perimeter.
    pub fn tick(&mut self, snapshot: &GameSnapshot) -> TickOutput {
        let mut out = TickOutput::default();
        let force = self.combat_force(snapshot);

        self.update_posture(snapshot, &force, &mut out);
        self.defend_perimeter(snapshot, &force, &mut out);

        out
    }

    /// Alive friendly units minus the exclusion set.
    fn combat_force(&self, snapshot: &GameSnapshot) -> Vec<FriendlyUnit> {
        snapshot
            .friendly_units
            .iter()
            .filter(|u| u.alive && !self.exclusion.contains(&u.kind))
            .copied()
            .collect()
    }

    /// Attack/hold hysteresis over the army-wide win probability.
    fn update_posture(
        &mut self,
        snapshot: &GameSnapshot,
        force: &[FriendlyUnit],
        out: &mut TickOutput,
    ) {
        let win_prob = eval_or_assume_loss(&*self.oracle, force, &snapshot.enemy_units);

        if win_prob > PUSH_COMMIT_PROB {
            if !self.attacking {
                out.events.push(TacticalEvent::PushCommitted { win_prob });
            }
            self.attacking = true;
            self.issue_push(snapshot, force, out);
        } else if win_prob < PUSH_ABANDON_PROB {
            if self.attacking {
                self.attacking = false;
                out.events.push(TacticalEvent::PushAbandoned { win_prob });
                for unit in force {
                    out.commands.push(UnitCommand::Move {
                        unit: unit.tag,
                        to: self.rally_point,
                    });
                }
            }
        } else if self.attacking {
            // Hysteresis band: the flag holds, the push keeps its orders.
            self.issue_push(snapshot, force, out);
        }
    }

    /// Send the whole combat force at the enemy main structure closest to
    /// home, falling back to the enemy start location when no structure is
    /// visible.
    fn issue_push(&self, snapshot: &GameSnapshot, force: &[FriendlyUnit], out: &mut TickOutput) {
        let target = snapshot
            .enemy_units
            .iter()
            .filter(|e| e.alive && e.is_structure)
            .filter_map(|e| e.position)
            .min_by(|a, b| {
                snapshot
                    .home_base
                    .distance_to(a)
                    .total_cmp(&snapshot.home_base.distance_to(b))
            })
            .unwrap_or(snapshot.enemy_start);

        for unit in force {
            dispatch_attack(unit, target, snapshot, out);
        }
    }

    /// Local defense: prune stale engagements, detect a threatening squad,
    /// allocate a counter-force, dispatch it at the squad's current
    /// centroid.
    fn defend_perimeter(
        &mut self,
        snapshot: &GameSnapshot,
        force: &[FriendlyUnit],
        out: &mut TickOutput,
    ) {
        let visible: BTreeSet<UnitTag> = snapshot
            .enemy_units
            .iter()
            .filter(|e| e.alive)
            .map(|e| e.tag)
            .collect();
        self.cache.prune_vanished(&visible);

        let Some(squad) = detect_threat(snapshot) else {
            return;
        };
        out.events.push(TacticalEvent::ThreatDetected {
            squad_size: squad.members.len(),
            centroid: squad.centroid,
        });

        let allocation = allocate(&mut self.cache, &*self.oracle, &squad, force);
        let defenders: BTreeSet<UnitTag> = match allocation.path {
            AllocationPath::CacheHit => {
                out.events.push(TacticalEvent::EngagementReused {
                    enemy_count: squad.member_tags.len(),
                    counter_count: allocation.counter_tags.len(),
                });
                allocation.counter_tags
            }
            AllocationPath::Augmented => {
                out.events.push(TacticalEvent::EngagementAugmented {
                    counter_count: allocation.counter_tags.len(),
                    oracle_calls: allocation.oracle_calls,
                });
                allocation.counter_tags
            }
            AllocationPath::Recomputed => {
                out.events.push(TacticalEvent::EngagementRecomputed {
                    counter_count: allocation.counter_tags.len(),
                    oracle_calls: allocation.oracle_calls,
                });
                allocation.counter_tags
            }
            AllocationPath::CannotWin => {
                // No sufficient subset exists. Hold with everything we have
                // (economy units stay excluded); nothing is cached.
                out.events.push(TacticalEvent::DefenseOverwhelmed {
                    squad_size: squad.members.len(),
                });
                force.iter().map(|u| u.tag).collect()
            }
        };

        for unit in force.iter().filter(|u| defenders.contains(&u.tag)) {
            dispatch_attack(unit, squad.centroid, snapshot, out);
        }
    }
}

/// Issue the base attack order and route the unit through its stance
/// controller, which may append mode switches and local target orders.
fn dispatch_attack(
    unit: &FriendlyUnit,
    target: Position,
    snapshot: &GameSnapshot,
    out: &mut TickOutput,
) {
    out.commands.push(UnitCommand::Attack {
        unit: unit.tag,
        target: AttackTarget::Point(target),
    });
    if let Some(stance) = controller_for(unit.kind) {
        out.commands
            .extend(stance.on_dispatch(unit, &snapshot.enemy_units));
    }
}

/// The rally point: nearest expansion farther than the minimum distance
/// from home, shifted toward the map center so the army sits forward of the
/// mineral line. Falls back to the home base when no expansion qualifies.
fn initial_rally_point(snapshot: &GameSnapshot) -> Position {
    let mut closest: Option<Position> = None;
    let mut min_distance = f64::INFINITY;
    for pos in &snapshot.expansion_locations {
        let distance = snapshot.home_base.distance_to(pos);
        if distance > RALLY_MIN_EXPANSION_DISTANCE && distance < min_distance {
            min_distance = distance;
            closest = Some(*pos);
        }
    }
    match closest {
        Some(pos) => pos.towards(&snapshot.map_center, RALLY_FORWARD_OFFSET),
        None => snapshot.home_base,
    }
}
