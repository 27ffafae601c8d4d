//! Engagement data model — active `enemy-id-set → counter-force` mappings.
//!
//! The cache is keyed by set relations, not by a scalar key: lookups ask
//! for set equality (exact reuse) or a proper-subset relation (the squad
//! grew). Subset/superset checks are O(entries × squad size), which is fine
//! for the tens of concurrent engagements a match produces; this structure
//! is not built for thousands of entries.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use vanguard_core::types::UnitTag;

/// A cached assignment of friendly units to an enemy squad.
/// Identity is `enemy_tags` set equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub enemy_tags: BTreeSet<UnitTag>,
    pub counter_tags: BTreeSet<UnitTag>,
}

impl Engagement {
    pub fn new(
        enemy_tags: impl IntoIterator<Item = UnitTag>,
        counter_tags: impl IntoIterator<Item = UnitTag>,
    ) -> Self {
        Self {
            enemy_tags: enemy_tags.into_iter().collect(),
            counter_tags: counter_tags.into_iter().collect(),
        }
    }
}

/// Ordered collection of active engagements.
///
/// Invariants:
/// 1. No two entries have set-equal `enemy_tags`.
/// 2. After inserting an entry with ids `S`, no remaining entry's ids are a
///    proper subset of `S`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementCache {
    entries: Vec<Engagement>,
}

impl EngagementCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Engagement] {
        &self.entries
    }

    /// The entry whose enemy ids equal `tags`, if any.
    pub fn find_exact(&self, tags: &BTreeSet<UnitTag>) -> Option<&Engagement> {
        self.entries.iter().find(|e| &e.enemy_tags == tags)
    }

    /// The first entry (insertion order) whose enemy ids are a proper
    /// subset of `tags` — the squad it was allocated against has grown.
    pub fn find_proper_subset(&self, tags: &BTreeSet<UnitTag>) -> Option<&Engagement> {
        self.entries
            .iter()
            .find(|e| e.enemy_tags.is_subset(tags) && e.enemy_tags != *tags)
    }

    /// Union of counter units across every entry except the one keyed by
    /// `except`. A unit already committed elsewhere is not available for
    /// augmentation.
    pub fn committed_elsewhere(&self, except: &BTreeSet<UnitTag>) -> BTreeSet<UnitTag> {
        self.entries
            .iter()
            .filter(|e| &e.enemy_tags != except)
            .flat_map(|e| e.counter_tags.iter().copied())
            .collect()
    }

    /// Insert an engagement, upholding both invariants: any entry with the
    /// same id set is replaced, and every entry whose ids are a proper
    /// subset of the new entry's is pruned as subsumed.
    pub fn insert(&mut self, engagement: Engagement) {
        let tags = engagement.enemy_tags.clone();
        self.entries.retain(|e| !e.enemy_tags.is_subset(&tags));
        self.entries.push(engagement);
    }

    /// Remove the entry keyed by `tags`. Returns it if present.
    pub fn remove(&mut self, tags: &BTreeSet<UnitTag>) -> Option<Engagement> {
        let idx = self.entries.iter().position(|e| &e.enemy_tags == tags)?;
        Some(self.entries.remove(idx))
    }

    /// Drop every entry with no member left in the visible enemy roster.
    /// Subsumption alone never removes an engagement whose squad simply
    /// vanished, so the controller runs this each tick to bound growth.
    pub fn prune_vanished(&mut self, visible: &BTreeSet<UnitTag>) {
        self.entries
            .retain(|e| e.enemy_tags.iter().any(|t| visible.contains(t)));
    }

    /// Identity invariant: no two entries share a set-equal id set.
    /// (The subsumption invariant is a property of `insert` and is asserted
    /// at insertion points by the tests.)
    pub fn identities_unique(&self) -> bool {
        for (i, a) in self.entries.iter().enumerate() {
            for b in self.entries.iter().skip(i + 1) {
                if a.enemy_tags == b.enemy_tags {
                    return false;
                }
            }
        }
        true
    }
}
