//! Force allocation — the smallest sufficient counter-force for a squad.
//!
//! Three paths, cheapest first: exact cache reuse (zero oracle calls),
//! subset augmentation (the squad grew, grow the assignment), and full
//! recomputation (greedy local minimization over the whole combat force).
//! Iteration order is ascending unit tag everywhere, so results are
//! deterministic and reproducible.

use std::collections::BTreeSet;

use vanguard_core::constants::COUNTER_SUFFICIENT_PROB;
use vanguard_core::snapshot::FriendlyUnit;
use vanguard_core::types::UnitTag;

use crate::detector::Squad;
use crate::engagement::{Engagement, EngagementCache};
use crate::oracle::{eval_or_assume_loss, CombatOracle};

/// Which path produced an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationPath {
    /// Unchanged squad, live counter-force: reused without oracle calls.
    CacheHit,
    /// A cached subset assignment was grown to cover the enlarged squad.
    Augmented,
    /// Recomputed from the full combat force.
    Recomputed,
    /// Even the full combat force stays at or below the sufficiency
    /// threshold. Nothing is cached; the caller decides the fallback.
    CannotWin,
}

/// Result of one allocation run.
#[derive(Debug, Clone)]
pub struct Allocation {
    pub counter_tags: BTreeSet<UnitTag>,
    pub path: AllocationPath,
    /// Oracle evaluations spent on this allocation.
    pub oracle_calls: usize,
}

/// Allocate a counter-force for `squad`, reading and updating the cache.
///
/// `combat_force` is the alive, combat-capable friendly roster in snapshot
/// order; it is re-sorted by tag internally.
pub fn allocate(
    cache: &mut EngagementCache,
    oracle: &dyn CombatOracle,
    squad: &Squad,
    combat_force: &[FriendlyUnit],
) -> Allocation {
    let force_tags: BTreeSet<UnitTag> = combat_force.iter().map(|u| u.tag).collect();

    // Exact reuse: same squad, counter-force fully alive.
    if let Some(entry) = cache.find_exact(&squad.member_tags) {
        if entry.counter_tags.is_subset(&force_tags) {
            tracing::debug!(
                enemies = entry.enemy_tags.len(),
                counters = entry.counter_tags.len(),
                "engagement cache hit"
            );
            return Allocation {
                counter_tags: entry.counter_tags.clone(),
                path: AllocationPath::CacheHit,
                oracle_calls: 0,
            };
        }
        // A dead counter unit invalidates the entry; fall through to
        // recomputation below.
    }

    // Subset augmentation: the squad grew around a cached assignment.
    if let Some(entry) = cache.find_proper_subset(&squad.member_tags) {
        if entry.counter_tags.is_subset(&force_tags) {
            let entry = entry.clone();
            if let Some((augmented, calls)) =
                augment(cache, oracle, squad, combat_force, &entry)
            {
                let added = augmented.len() - entry.counter_tags.len();
                cache.remove(&entry.enemy_tags);
                cache.insert(Engagement {
                    enemy_tags: squad.member_tags.clone(),
                    counter_tags: augmented.clone(),
                });
                tracing::debug!(added, total = augmented.len(), "engagement augmented");
                return Allocation {
                    counter_tags: augmented,
                    path: AllocationPath::Augmented,
                    oracle_calls: calls,
                };
            }
            // Pool exhausted below the threshold: a failed augmentation is
            // never cached. Recompute from scratch instead.
        }
    }

    recompute(cache, oracle, squad, combat_force)
}

/// Grow `entry`'s counter-force one candidate at a time until the oracle
/// exceeds the sufficiency threshold. Candidates are the combat force minus
/// units committed to other engagements minus the entry's own units, in
/// ascending-tag order. Returns `None` when the pool runs dry first.
fn augment(
    cache: &EngagementCache,
    oracle: &dyn CombatOracle,
    squad: &Squad,
    combat_force: &[FriendlyUnit],
    entry: &Engagement,
) -> Option<(BTreeSet<UnitTag>, usize)> {
    let used = cache.committed_elsewhere(&entry.enemy_tags);
    let pool: Vec<UnitTag> = combat_force
        .iter()
        .map(|u| u.tag)
        .filter(|t| !used.contains(t) && !entry.counter_tags.contains(t))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut augmented = entry.counter_tags.clone();
    let mut calls = 0;
    for candidate in pool {
        augmented.insert(candidate);
        calls += 1;
        let prob = eval_or_assume_loss(
            oracle,
            &units_for(combat_force, &augmented),
            &squad.members,
        );
        if prob > COUNTER_SUFFICIENT_PROB {
            return Some((augmented, calls));
        }
    }
    None
}

/// Full recomputation: start from the whole combat force and greedily drop
/// units while the oracle stays strictly above the threshold. The result is
/// locally minimal — removing any one remaining unit drops the estimate to
/// or below the threshold — but depends on the fixed ascending-tag order.
fn recompute(
    cache: &mut EngagementCache,
    oracle: &dyn CombatOracle,
    squad: &Squad,
    combat_force: &[FriendlyUnit],
) -> Allocation {
    let mut calls = 1;
    let base_prob = eval_or_assume_loss(oracle, combat_force, &squad.members);
    if base_prob <= COUNTER_SUFFICIENT_PROB {
        tracing::debug!(
            win_prob = base_prob,
            squad_size = squad.members.len(),
            "full combat force insufficient against squad"
        );
        return Allocation {
            counter_tags: BTreeSet::new(),
            path: AllocationPath::CannotWin,
            oracle_calls: calls,
        };
    }

    let mut working: Vec<UnitTag> = combat_force
        .iter()
        .map(|u| u.tag)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut idx = 0;
    while idx < working.len() {
        let removed = working.remove(idx);
        calls += 1;
        let tags: BTreeSet<UnitTag> = working.iter().copied().collect();
        let prob = eval_or_assume_loss(oracle, &units_for(combat_force, &tags), &squad.members);
        if prob <= COUNTER_SUFFICIENT_PROB {
            working.insert(idx, removed);
            idx += 1;
        }
        // On a kept removal the next candidate slides into this index.
    }

    let counter_tags: BTreeSet<UnitTag> = working.into_iter().collect();
    cache.insert(Engagement {
        enemy_tags: squad.member_tags.clone(),
        counter_tags: counter_tags.clone(),
    });
    tracing::debug!(
        counters = counter_tags.len(),
        oracle_calls = calls,
        "engagement recomputed"
    );
    Allocation {
        counter_tags,
        path: AllocationPath::Recomputed,
        oracle_calls: calls,
    }
}

/// Materialize the snapshot rows for a tag set, preserving tag order.
fn units_for(combat_force: &[FriendlyUnit], tags: &BTreeSet<UnitTag>) -> Vec<FriendlyUnit> {
    let mut units: Vec<FriendlyUnit> = combat_force
        .iter()
        .filter(|u| tags.contains(&u.tag))
        .copied()
        .collect();
    units.sort_by_key(|u| u.tag);
    units
}
