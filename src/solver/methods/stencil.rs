//! Second-difference stencil shared by the 1D and 2D solvers
//!
//! Along one axis, with mesh ratio `ρ` (`r` for a full backward-Euler step,
//! `r/2` for an ADI half step), the implicit operator `I − ρ·L` of a line of
//! `n` nodes has rows
//!
//! ```text
//! free node       −ρ·u[i-1] + (1 + 2ρ)·u[i] − ρ·u[i+1]
//! insulated wall  (1 + 2ρ)·u[0] − 2ρ·u[1]
//! fixed node      u[i]
//! ```

use crate::solver::BoundaryPolicy;

/// Bands of `I − ρ·L` along one axis
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ImplicitOperator {
    pub(crate) lower: Vec<f64>,
    pub(crate) diagonal: Vec<f64>,
    pub(crate) upper: Vec<f64>,
}

impl ImplicitOperator {
    pub(crate) fn new(points: usize, ratio: f64, boundary: BoundaryPolicy) -> Self {
        let mut lower = vec![0.0; points - 1];
        let mut diagonal = vec![1.0; points];
        let mut upper = vec![0.0; points - 1];

        for i in boundary.free_range(points) {
            diagonal[i] = 1.0 + 2.0 * ratio;
            if i == 0 {
                // mirror ghost node u[-1] = u[1]
                upper[0] = -2.0 * ratio;
            } else {
                lower[i - 1] = -ratio;
                upper[i] = -ratio;
            }
        }

        Self {
            lower,
            diagonal,
            upper,
        }
    }
}

/// Second difference `u[i-1] − 2u[i] + u[i+1]` of a free node
///
/// At `i = 0` the node is an insulated wall and the mirror ghost gives
/// `2·(u[1] − u[0])`.
#[inline]
pub(crate) fn second_difference(line: &[f64], i: usize) -> f64 {
    if i == 0 {
        2.0 * (line[1] - line[0])
    } else {
        line[i - 1] - 2.0 * line[i] + line[i + 1]
    }
}
