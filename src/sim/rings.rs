//! Concentric scoring rings
//!
//! Rings are stored outer to inner:
//! - radii strictly decreasing (outermost == target collision radius)
//! - points strictly increasing (innermost scores highest)

use serde::{Deserialize, Serialize};

use crate::consts::{RING_FRACTIONS, RING_POINTS};

/// One scoring band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub radius: f32,
    pub points: u32,
}

/// Ordered set of rings for a target of a given radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRings {
    rings: Vec<Ring>,
}

impl ScoringRings {
    /// Build the standard ring layout for a target radius
    ///
    /// Inner radii are floored to whole pixels; the outer ring keeps the exact
    /// radius so every hit resolves to a ring.
    pub fn for_radius(radius: f32) -> Self {
        let rings = RING_FRACTIONS
            .iter()
            .zip(RING_POINTS)
            .enumerate()
            .map(|(i, (&fraction, points))| Ring {
                radius: if i == 0 { radius } else { (radius * fraction).floor() },
                points,
            })
            .collect();
        Self { rings }
    }

    /// Rings outer to inner
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Outermost radius
    pub fn outer_radius(&self) -> f32 {
        self.rings.first().map(|r| r.radius).unwrap_or(0.0)
    }

    /// Points for a hit at `distance` from the center
    ///
    /// Walks from the innermost ring outward and returns the first ring that
    /// contains the distance. `None` outside the outer ring.
    pub fn points_at(&self, distance: f32) -> Option<u32> {
        self.rings
            .iter()
            .rev()
            .find(|ring| distance <= ring.radius)
            .map(|ring| ring.points)
    }

    /// Radii strictly decreasing and points strictly increasing
    pub fn is_well_ordered(&self) -> bool {
        self.rings
            .windows(2)
            .all(|w| w[0].radius > w[1].radius && w[0].points < w[1].points)
    }
}
