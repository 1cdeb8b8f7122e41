//! Overlap detection and lane geometry
//!
//! Sprites on the road are wider than they are tall in-lane, so the overlap
//! box is tighter in X than in Y. Both tolerances scale with the combined
//! radius of the two bodies.

use serde::{Deserialize, Serialize};

use super::entity::Body;
use crate::consts::*;

/// Fraction of the combined radius allowed horizontally
pub const OVERLAP_X_FACTOR: f64 = 0.25;
/// Fraction of the combined radius allowed vertically
pub const OVERLAP_Y_FACTOR: f64 = 0.6;

/// True when two bodies' collision boxes intersect
#[inline]
pub fn overlap(a: &Body, b: &Body) -> bool {
    let delta = (a.pos - b.pos).abs();
    let radius_sum = a.radius() + b.radius();
    delta.x < radius_sum * OVERLAP_X_FACTOR && delta.y < radius_sum * OVERLAP_Y_FACTOR
}

/// One of the three bands of the road
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lane {
    Left,
    Middle,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Middle, Lane::Right];

    /// Lane for an index, wrapping out-of-range values
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(3) as usize]
    }

    /// Next lane to the right, wrapping back to the left lane
    pub fn next(self) -> Self {
        match self {
            Lane::Left => Lane::Middle,
            Lane::Middle => Lane::Right,
            Lane::Right => Lane::Left,
        }
    }

    /// Half-open horizontal extent of the lane
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Lane::Left => (LEFT_EDGE, LEFT_DIVIDER),
            Lane::Middle => (LEFT_DIVIDER, RIGHT_DIVIDER),
            Lane::Right => (RIGHT_DIVIDER, RIGHT_EDGE),
        }
    }

    pub fn contains(self, x: f64) -> bool {
        let (low, high) = self.bounds();
        x >= low && x < high
    }

    /// Column where cabs enter this lane
    pub fn spawn_x(self) -> f64 {
        match self {
            Lane::Left => LEFT_LANE_X,
            Lane::Middle => ROAD_CENTER,
            Lane::Right => RIGHT_LANE_X,
        }
    }
}
