//! Fundamental geometric and identity types.

use serde::{Deserialize, Serialize};

/// Stable engine-assigned unit identifier. Survives morphs (a sieged tank
/// keeps the tag it had while mobile); never reused within a match.
pub type UnitTag = u64;

/// 2D position in map coordinates (distance units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// The point `distance` units from `self` along the ray toward `other`.
    /// Returns `self` unchanged when the two points coincide.
    pub fn towards(&self, other: &Position, distance: f64) -> Position {
        let d = self.distance_to(other);
        if d < 1e-9 {
            return *self;
        }
        Position::new(
            self.x + (other.x - self.x) / d * distance,
            self.y + (other.y - self.y) / d * distance,
        )
    }
}

/// Mean of a non-empty set of positions. Origin for an empty slice.
pub fn centroid(points: &[Position]) -> Position {
    if points.is_empty() {
        return Position::default();
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Position::new(sx / n, sy / n)
}
