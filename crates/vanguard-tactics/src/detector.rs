//! Threat detection — finds the enemy squad nearest the defended base.

use std::collections::BTreeSet;

use vanguard_core::constants::{DEFENSE_PERIMETER_RADIUS, SQUAD_CLUSTER_RADIUS};
use vanguard_core::snapshot::{EnemyUnit, GameSnapshot};
use vanguard_core::types::{centroid, Position, UnitTag};

/// An ephemeral radius-derived grouping of enemy units, recomputed each
/// tick and never persisted.
#[derive(Debug, Clone)]
pub struct Squad {
    pub member_tags: BTreeSet<UnitTag>,
    pub members: Vec<EnemyUnit>,
    pub centroid: Position,
}

/// Detect the squad threatening the defense perimeter this tick, if any.
///
/// Returns `None` (retry next tick) when either force is empty, when no
/// enemy resolves to a position (incomplete snapshot), or when the squad is
/// nowhere near an owned structure. A single radius pass around the nearest
/// enemy forms the squad; separate pockets near the same anchor are not
/// merged.
pub fn detect_threat(snapshot: &GameSnapshot) -> Option<Squad> {
    let anchor = snapshot
        .friendly_units
        .iter()
        .filter(|u| u.alive)
        .min_by(|a, b| {
            a.position
                .distance_to(&snapshot.home_base)
                .total_cmp(&b.position.distance_to(&snapshot.home_base))
        })?;

    if !snapshot.enemy_units.iter().any(|e| e.alive) {
        return None;
    }

    // Nearest enemy to the anchor, over position-resolved entries only; a
    // snapshot where nothing resolves aborts detection for this tick.
    let nearest_pos = snapshot
        .enemy_units
        .iter()
        .filter(|e| e.alive)
        .filter_map(|e| e.position)
        .min_by(|a, b| {
            anchor
                .position
                .distance_to(a)
                .total_cmp(&anchor.position.distance_to(b))
        })?;

    let members: Vec<EnemyUnit> = snapshot
        .enemy_units
        .iter()
        .filter(|e| e.alive)
        .filter(|e| {
            e.position
                .is_some_and(|p| p.distance_to(&nearest_pos) <= SQUAD_CLUSTER_RADIUS)
        })
        .copied()
        .collect();

    let within_perimeter = members.iter().filter_map(|m| m.position).any(|pos| {
        snapshot
            .own_structures
            .iter()
            .any(|s| s.position.distance_to(&pos) <= DEFENSE_PERIMETER_RADIUS)
    });
    if !within_perimeter {
        tracing::debug!(
            squad_size = members.len(),
            "squad outside defense perimeter, ignored"
        );
        return None;
    }

    let positions: Vec<Position> = members.iter().filter_map(|m| m.position).collect();
    Some(Squad {
        member_tags: members.iter().map(|m| m.tag).collect(),
        centroid: centroid(&positions),
        members,
    })
}
