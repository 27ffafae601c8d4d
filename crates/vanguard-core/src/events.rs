//! Decision telemetry emitted by the combat core each tick.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// One tactical decision record. Emitted alongside the tick's commands so
/// tests and telemetry consumers can observe which path produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TacticalEvent {
    /// The army committed to an offensive push.
    PushCommitted { win_prob: f64 },
    /// A committed push was abandoned; the army falls back to the rally point.
    PushAbandoned { win_prob: f64 },
    /// A threatening squad was detected inside the defense perimeter.
    ThreatDetected { squad_size: usize, centroid: Position },
    /// An existing engagement was reused unchanged (no oracle calls).
    EngagementReused { enemy_count: usize, counter_count: usize },
    /// An engagement was grown to cover an enlarged squad.
    EngagementAugmented { counter_count: usize, oracle_calls: usize },
    /// A counter-force was recomputed from scratch.
    EngagementRecomputed { counter_count: usize, oracle_calls: usize },
    /// No sufficient counter-force exists; the whole combat force holds.
    DefenseOverwhelmed { squad_size: usize },
}
