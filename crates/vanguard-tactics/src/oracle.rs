//! Combat outcome prediction.
//!
//! The oracle contract is implementation-agnostic: a closed-form power
//! heuristic and a trained classifier both satisfy it. The decision core
//! only ever sees a probability in [0, 1].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use vanguard_core::enums::UnitKind;
use vanguard_core::snapshot::{EnemyUnit, FriendlyUnit};
use vanguard_core::types::UnitTag;

/// Oracle failure. Callers treat any error as probability 0 (assume loss)
/// rather than propagating it.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("combat model unavailable: {0}")]
    Unavailable(String),
    #[error("combat evaluation timed out")]
    Timeout,
}

/// Predicts the probability that `friendly` defeats `enemy`.
///
/// Calls are synchronous and may be expensive; the allocator's full
/// recomputation path issues O(n) of them per detected threat, so
/// implementations should answer well within a tick. Dead units in either
/// slice must be ignored.
pub trait CombatOracle {
    fn evaluate(&self, friendly: &[FriendlyUnit], enemy: &[EnemyUnit]) -> Result<f64, OracleError>;
}

/// Per-kind combat power, split by target domain.
/// Economy units and structures carry no power.
fn ground_power(kind: UnitKind) -> f64 {
    match kind {
        UnitKind::Trooper => 1.0,
        UnitKind::SiegeTank | UnitKind::SiegeTankSieged => 3.0,
        UnitKind::ValkyrieFighter | UnitKind::ValkyrieAssault => 2.0,
        _ => 0.0,
    }
}

fn air_power(kind: UnitKind) -> f64 {
    match kind {
        UnitKind::Trooper => 1.0,
        UnitKind::SiegeTank | UnitKind::SiegeTankSieged => 0.0,
        UnitKind::ValkyrieFighter | UnitKind::ValkyrieAssault => 2.0,
        _ => 0.0,
    }
}

/// Closed-form evaluator: aggregates per-kind power on each side and
/// combines the totals with the Lanchester square law.
///
/// Each unit's contribution is its ground power weighted by the opposing
/// force's ground fraction plus its air power weighted by the flyer
/// fraction, so a tank line scores poorly against an all-air force.
pub struct LanchesterOracle;

impl LanchesterOracle {
    fn friendly_power(friendly: &[FriendlyUnit], enemy_flyer_fraction: f64) -> f64 {
        friendly
            .iter()
            .filter(|u| u.alive)
            .map(|u| {
                ground_power(u.kind) * (1.0 - enemy_flyer_fraction)
                    + air_power(u.kind) * enemy_flyer_fraction
            })
            .sum()
    }

    fn enemy_power(enemy: &[EnemyUnit], friendly_flyer_fraction: f64) -> f64 {
        enemy
            .iter()
            .filter(|u| u.alive && !u.is_structure)
            .map(|u| {
                let ground = ground_power(u.kind).max(if u.ground_range > 0.0 { 0.5 } else { 0.0 });
                let air = if u.is_flying {
                    air_power(u.kind).max(0.5)
                } else {
                    air_power(u.kind)
                };
                ground * (1.0 - friendly_flyer_fraction) + air * friendly_flyer_fraction
            })
            .sum()
    }
}

impl CombatOracle for LanchesterOracle {
    fn evaluate(&self, friendly: &[FriendlyUnit], enemy: &[EnemyUnit]) -> Result<f64, OracleError> {
        let live_friendly: Vec<&FriendlyUnit> = friendly.iter().filter(|u| u.alive).collect();
        let live_enemy: Vec<&EnemyUnit> = enemy
            .iter()
            .filter(|u| u.alive && !u.is_structure)
            .collect();

        if live_enemy.is_empty() {
            return Ok(1.0);
        }
        if live_friendly.is_empty() {
            return Ok(0.0);
        }

        let enemy_flyers = live_enemy.iter().filter(|u| u.is_flying).count();
        let enemy_flyer_fraction = enemy_flyers as f64 / live_enemy.len() as f64;
        let friendly_flyers = live_friendly.iter().filter(|u| u.kind.is_flying()).count();
        let friendly_flyer_fraction = friendly_flyers as f64 / live_friendly.len() as f64;

        let f = Self::friendly_power(friendly, enemy_flyer_fraction);
        let e = Self::enemy_power(enemy, friendly_flyer_fraction);

        if f <= 0.0 && e <= 0.0 {
            return Ok(0.5);
        }
        // Lanchester square law: concentrated force wins superlinearly.
        Ok((f * f) / (f * f + e * e))
    }
}

/// Key for one scripted evaluation: sorted friendly tags vs. sorted enemy
/// tags. Sorting makes the lookup independent of roster iteration order.
type ForceKey = (Vec<UnitTag>, Vec<UnitTag>);

#[derive(Default)]
struct ScriptedInner {
    table: RefCell<HashMap<ForceKey, f64>>,
    default: Cell<f64>,
    calls: Cell<usize>,
}

/// Deterministic table-driven oracle for tests and scripted arenas.
///
/// Unknown force pairs fall back to a default probability, and every
/// evaluation is counted so tests can assert the cheap cache path made zero
/// calls. The handle is a cheap clone over shared state: keep one clone for
/// scripting and assertions after boxing another into a controller.
#[derive(Clone, Default)]
pub struct ScriptedOracle {
    inner: Rc<ScriptedInner>,
}

impl ScriptedOracle {
    pub fn new(default: f64) -> Self {
        let oracle = Self::default();
        oracle.inner.default.set(default);
        oracle
    }

    /// Script the result for a specific pair of forces.
    pub fn script(
        &self,
        friendly: impl IntoIterator<Item = UnitTag>,
        enemy: impl IntoIterator<Item = UnitTag>,
        prob: f64,
    ) {
        let key = (sorted(friendly), sorted(enemy));
        self.inner.table.borrow_mut().insert(key, prob);
    }

    /// Number of evaluations performed so far.
    pub fn calls(&self) -> usize {
        self.inner.calls.get()
    }

    pub fn reset_calls(&self) {
        self.inner.calls.set(0);
    }
}

impl CombatOracle for ScriptedOracle {
    fn evaluate(&self, friendly: &[FriendlyUnit], enemy: &[EnemyUnit]) -> Result<f64, OracleError> {
        self.inner.calls.set(self.inner.calls.get() + 1);
        let key = (
            sorted(friendly.iter().filter(|u| u.alive).map(|u| u.tag)),
            sorted(enemy.iter().filter(|u| u.alive).map(|u| u.tag)),
        );
        let prob = self
            .inner
            .table
            .borrow()
            .get(&key)
            .copied()
            .unwrap_or(self.inner.default.get());
        Ok(prob)
    }
}

/// An oracle that always fails. Exercises the assume-loss degradation path.
pub struct UnavailableOracle;

impl CombatOracle for UnavailableOracle {
    fn evaluate(&self, _: &[FriendlyUnit], _: &[EnemyUnit]) -> Result<f64, OracleError> {
        Err(OracleError::Unavailable("no model loaded".into()))
    }
}

fn sorted(tags: impl IntoIterator<Item = UnitTag>) -> Vec<UnitTag> {
    let mut v: Vec<UnitTag> = tags.into_iter().collect();
    v.sort_unstable();
    v
}

/// Evaluate with the assume-loss policy: an oracle error degrades to
/// probability 0 instead of surfacing.
pub(crate) fn eval_or_assume_loss(
    oracle: &dyn CombatOracle,
    friendly: &[FriendlyUnit],
    enemy: &[EnemyUnit],
) -> f64 {
    match oracle.evaluate(friendly, enemy) {
        Ok(p) => p.clamp(0.0, 1.0),
        Err(err) => {
            tracing::warn!(%err, "oracle evaluation failed, assuming loss");
            0.0
        }
    }
}
