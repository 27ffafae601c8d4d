//! Skirmish arena — a seeded micro-battle harness.
//!
//! Builds a two-sided roster, runs the army controller against a scripted
//! attacker, and produces a serializable outcome record. The records feed
//! learned-oracle training sets and give the tests a deterministic
//! end-to-end fixture: same seed, same record.

use std::collections::HashMap;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use vanguard_core::commands::{AttackTarget, UnitCommand};
use vanguard_core::enums::{AbilityKind, UnitKind};
use vanguard_core::snapshot::{EnemyUnit, FriendlyUnit, GameSnapshot, OwnStructure};
use vanguard_core::types::{Position, UnitTag};

use crate::controller::{default_exclusions, ArmyController};
use crate::oracle::LanchesterOracle;

/// Arena configuration. Counts are per kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub seed: u64,
    pub max_ticks: u64,
    pub friendly: Vec<(UnitKind, u32)>,
    pub enemy: Vec<(UnitKind, u32)>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_ticks: 2000,
            friendly: vec![(UnitKind::Trooper, 8), (UnitKind::SiegeTank, 2)],
            enemy: vec![(UnitKind::Trooper, 6)],
        }
    }
}

/// Outcome record for one arena run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaResult {
    pub seed: u64,
    pub ticks: u64,
    pub victory: bool,
    pub friendly_survivors: usize,
    pub enemy_survivors: usize,
}

/// Per-kind combat parameters for the arena's damage model:
/// (hit points, damage per tick, attack range, speed per tick).
fn unit_stats(kind: UnitKind) -> (f64, f64, f64, f64) {
    match kind {
        UnitKind::Trooper => (45.0, 1.4, 5.0, 0.6),
        UnitKind::SiegeTank => (175.0, 2.0, 7.0, 0.45),
        UnitKind::SiegeTankSieged => (175.0, 5.0, 13.0, 0.0),
        UnitKind::ValkyrieFighter => (135.0, 1.8, 9.0, 0.7),
        UnitKind::ValkyrieAssault => (135.0, 1.6, 6.0, 0.7),
        UnitKind::Worker | UnitKind::Hauler => (45.0, 0.0, 0.0, 0.5),
        _ => (500.0, 0.0, 0.0, 0.0),
    }
}

const HOME: Position = Position { x: 20.0, y: 20.0 };
const ENEMY_START: Position = Position { x: 80.0, y: 80.0 };
const MAP_CENTER: Position = Position { x: 50.0, y: 50.0 };

/// One micro battle. The friendly side is driven by an `ArmyController`
/// over a `LanchesterOracle`; the enemy side advances on the home base and
/// trades damage with whatever it reaches.
pub struct SkirmishArena {
    snapshot: GameSnapshot,
    controller: ArmyController,
    rng: ChaCha8Rng,
    hp: HashMap<UnitTag, f64>,
    tick: u64,
    seed: u64,
    max_ticks: u64,
}

impl SkirmishArena {
    pub fn new(config: &ArenaConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut next_tag: UnitTag = 1;

        let mut friendly_units = Vec::new();
        for (kind, count) in &config.friendly {
            for _ in 0..*count {
                friendly_units.push(FriendlyUnit {
                    tag: next_tag,
                    kind: *kind,
                    position: scatter(&mut rng, HOME, 6.0),
                    alive: true,
                });
                next_tag += 1;
            }
        }

        let mut enemy_units = Vec::new();
        for (kind, count) in &config.enemy {
            for _ in 0..*count {
                let (_, _, range, _) = unit_stats(*kind);
                enemy_units.push(EnemyUnit {
                    tag: next_tag,
                    kind: *kind,
                    position: Some(scatter(&mut rng, ENEMY_START, 6.0)),
                    ground_range: range,
                    is_flying: kind.is_flying(),
                    is_structure: false,
                    alive: true,
                });
                next_tag += 1;
            }
        }

        let snapshot = GameSnapshot {
            friendly_units,
            enemy_units,
            own_structures: vec![OwnStructure {
                tag: next_tag,
                kind: UnitKind::CommandPost,
                position: HOME,
            }],
            home_base: HOME,
            map_center: MAP_CENTER,
            enemy_start: ENEMY_START,
            expansion_locations: vec![Position::new(30.0, 14.0), Position::new(14.0, 30.0)],
        };

        let mut hp = HashMap::new();
        for u in &snapshot.friendly_units {
            hp.insert(u.tag, unit_stats(u.kind).0);
        }
        for e in &snapshot.enemy_units {
            hp.insert(e.tag, unit_stats(e.kind).0);
        }

        let controller =
            ArmyController::new(Box::new(LanchesterOracle), default_exclusions(), &snapshot);

        Self {
            snapshot,
            controller,
            rng,
            hp,
            tick: 0,
            seed: config.seed,
            max_ticks: config.max_ticks,
        }
    }

    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// Advance one tick: controller decisions, then command application,
    /// then the scripted enemy side.
    pub fn step(&mut self) {
        let out = self.controller.tick(&self.snapshot);
        self.apply_commands(&out.commands);
        self.run_enemy_script();
        self.resolve_deaths();
        self.tick += 1;
    }

    /// Run until one side has no combat units left or the tick budget runs
    /// out.
    pub fn run(mut self) -> ArenaResult {
        while self.tick < self.max_ticks && !self.decided() {
            self.step();
        }
        let friendly_survivors = self
            .snapshot
            .friendly_units
            .iter()
            .filter(|u| u.alive)
            .count();
        let enemy_survivors = self
            .snapshot
            .enemy_units
            .iter()
            .filter(|e| e.alive)
            .count();
        ArenaResult {
            seed: self.seed,
            ticks: self.tick,
            victory: enemy_survivors == 0 && friendly_survivors > 0,
            friendly_survivors,
            enemy_survivors,
        }
    }

    fn decided(&self) -> bool {
        let friendly_alive = self.snapshot.friendly_units.iter().any(|u| u.alive);
        let enemy_alive = self.snapshot.enemy_units.iter().any(|e| e.alive);
        !friendly_alive || !enemy_alive
    }

    fn apply_commands(&mut self, commands: &[UnitCommand]) {
        for command in commands {
            match *command {
                UnitCommand::Move { unit, to } => {
                    self.move_friendly(unit, to);
                }
                UnitCommand::Attack { unit, target } => {
                    let target_pos = match target {
                        AttackTarget::Point(p) => Some(p),
                        AttackTarget::Unit(tag) => self
                            .snapshot
                            .enemy_units
                            .iter()
                            .find(|e| e.tag == tag && e.alive)
                            .and_then(|e| e.position),
                    };
                    let Some(target_pos) = target_pos else { continue };
                    self.attack_with_friendly(unit, target_pos, target);
                }
                UnitCommand::UseAbility { unit, ability } => {
                    self.morph_friendly(unit, ability);
                }
            }
        }
    }

    fn move_friendly(&mut self, tag: UnitTag, to: Position) {
        if let Some(u) = self
            .snapshot
            .friendly_units
            .iter_mut()
            .find(|u| u.tag == tag && u.alive)
        {
            let (_, _, _, speed) = unit_stats(u.kind);
            let step = speed.min(u.position.distance_to(&to));
            u.position = u.position.towards(&to, step);
        }
    }

    /// Advance toward the target and damage the closest enemy in range.
    /// Attack orders at a specific unit prefer that unit when reachable.
    fn attack_with_friendly(&mut self, tag: UnitTag, target_pos: Position, target: AttackTarget) {
        let Some(u) = self
            .snapshot
            .friendly_units
            .iter()
            .find(|u| u.tag == tag && u.alive)
            .copied()
        else {
            return;
        };
        let (_, dps, range, _) = unit_stats(u.kind);

        let preferred: Option<UnitTag> = match target {
            AttackTarget::Unit(t) => Some(t),
            AttackTarget::Point(_) => None,
        };
        let in_range: Vec<(UnitTag, f64)> = self
            .snapshot
            .enemy_units
            .iter()
            .filter(|e| e.alive)
            .filter_map(|e| e.position.map(|p| (e.tag, u.position.distance_to(&p))))
            .filter(|(_, d)| *d <= range)
            .collect();
        let victim = preferred
            .filter(|p| in_range.iter().any(|(t, _)| t == p))
            .or_else(|| {
                in_range
                    .iter()
                    .min_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(t, _)| *t)
            });

        match victim {
            Some(victim_tag) if dps > 0.0 => {
                let jitter = self.rng.gen_range(0.8..1.2);
                if let Some(hp) = self.hp.get_mut(&victim_tag) {
                    *hp -= dps * jitter;
                }
            }
            _ => {
                self.move_friendly(tag, target_pos);
            }
        }
    }

    fn morph_friendly(&mut self, tag: UnitTag, ability: AbilityKind) {
        if let Some(u) = self
            .snapshot
            .friendly_units
            .iter_mut()
            .find(|u| u.tag == tag && u.alive)
        {
            u.kind = match (u.kind, ability) {
                (UnitKind::SiegeTank, AbilityKind::SiegeMode) => UnitKind::SiegeTankSieged,
                (UnitKind::SiegeTankSieged, AbilityKind::Unsiege) => UnitKind::SiegeTank,
                (UnitKind::ValkyrieAssault, AbilityKind::FighterMode) => UnitKind::ValkyrieFighter,
                (UnitKind::ValkyrieFighter, AbilityKind::AssaultMode) => UnitKind::ValkyrieAssault,
                (kind, _) => kind,
            };
        }
    }

    /// The scripted opposition: every enemy advances on the home base and
    /// hits the nearest friendly unit in range.
    fn run_enemy_script(&mut self) {
        let friendly: Vec<(UnitTag, Position)> = self
            .snapshot
            .friendly_units
            .iter()
            .filter(|u| u.alive)
            .map(|u| (u.tag, u.position))
            .collect();

        let mut damage: Vec<(UnitTag, f64)> = Vec::new();
        for e in self.snapshot.enemy_units.iter_mut().filter(|e| e.alive) {
            let Some(pos) = e.position else { continue };
            let (_, dps, range, speed) = unit_stats(e.kind);
            let nearest = friendly
                .iter()
                .map(|(t, p)| (*t, pos.distance_to(p)))
                .min_by(|a, b| a.1.total_cmp(&b.1));
            match nearest {
                Some((victim, d)) if d <= range && dps > 0.0 => {
                    damage.push((victim, dps));
                }
                _ => {
                    e.position = Some(pos.towards(&HOME, speed));
                }
            }
        }
        for (victim, dps) in damage {
            let jitter = self.rng.gen_range(0.8..1.2);
            if let Some(hp) = self.hp.get_mut(&victim) {
                *hp -= dps * jitter;
            }
        }
    }

    fn resolve_deaths(&mut self) {
        for u in self.snapshot.friendly_units.iter_mut() {
            if u.alive && self.hp.get(&u.tag).copied().unwrap_or(0.0) <= 0.0 {
                u.alive = false;
            }
        }
        for e in self.snapshot.enemy_units.iter_mut() {
            if e.alive && self.hp.get(&e.tag).copied().unwrap_or(0.0) <= 0.0 {
                e.alive = false;
            }
        }
    }
}

/// Uniform scatter inside a square around `center`.
fn scatter(rng: &mut ChaCha8Rng, center: Position, spread: f64) -> Position {
    Position::new(
        center.x + rng.gen_range(-spread..spread),
        center.y + rng.gen_range(-spread..spread),
    )
}

/// Run one arena from a config and return its outcome record.
pub fn run_arena(config: &ArenaConfig) -> ArenaResult {
    SkirmishArena::new(config).run()
}
