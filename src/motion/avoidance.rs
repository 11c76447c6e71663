//! Soft pairwise separation between agents.
//!
//! Each agent closer than `min_separation` to a neighbor is pushed straight away from it by
//! half the overlap. Both members of a pair get the mirror push, so the pair separates by the
//! full overlap unless a boundary clamp eats part of it. Driven motion may re-converge agents
//! faster than this separates them; that is accepted.

use crate::foundation::core::{Point, Vec2};
use crate::motion::config::AvoidanceConfig;

/// Displacement per agent, computed from one snapshot of all positions.
///
/// `offsets[i]` is the sum of pushes agent `i` receives. Positions are never read after any
/// push is applied, so the result does not depend on iteration order.
pub fn avoidance_offsets(positions: &[Point], cfg: &AvoidanceConfig) -> Vec<Vec2> {
    let min_sep = cfg.min_separation;
    let mut offsets = vec![Vec2::ZERO; positions.len()];

    for (i, &a) in positions.iter().enumerate() {
        for (j, &b) in positions.iter().enumerate().skip(i + 1) {
            let delta = a - b;
            let dist = delta.hypot();
            if dist >= min_sep {
                continue;
            }
            // Coincident agents have no direction; split them along x.
            let dir = if dist > 0.0 {
                delta / dist
            } else {
                Vec2::new(1.0, 0.0)
            };
            let push = dir * ((min_sep - dist) * 0.5);
            offsets[i] += push;
            offsets[j] -= push;
        }
    }

    offsets
}

/// Number of pairs currently closer than the minimum separation.
pub fn overlapping_pairs(positions: &[Point], cfg: &AvoidanceConfig) -> usize {
    let mut n = 0;
    for (i, a) in positions.iter().enumerate() {
        n += positions[i + 1..]
            .iter()
            .filter(|b| a.distance(**b) < cfg.min_separation)
            .count();
    }
    n
}

#[cfg(test)]
#[path = "../../tests/unit/motion/avoidance.rs"]
mod tests;
