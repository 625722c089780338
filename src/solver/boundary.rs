//! Boundary conditions of the bar and the plate
//!
//! # Design Philosophy
//!
//! Both solvers work on one axis at a time (the 2D solver sweeps lines along x
//! then along y), so a policy is described per axis: which of the two end
//! nodes of a line are held fixed, and whether the lower end is an insulated
//! (zero-flux) wall.
//!
//! # Insulated wall
//!
//! A zero-flux wall at `x = 0` is discretized with a mirror ghost node
//! `u[-1] = u[1]`, which turns the second difference at the wall into
//!
//! ```text
//! ∂²u/∂x² ≈ 2·(u[1] − u[0]) / Δx²
//! ```
//!
//! and the backward-Euler row into `(1 + 2r)·u[0] − 2r·u[1]`.

use std::fmt;

// =================================================================================================
// Boundary policy
// =================================================================================================

/// Boundary conditions applied to every line of the domain
///
/// # Examples
///
/// ```rust
/// use heat_rs::solver::BoundaryPolicy;
///
/// let policy = BoundaryPolicy::default();
/// assert_eq!(policy, BoundaryPolicy::Dirichlet);
/// assert!(policy.is_fixed(0, 11));
///
/// let insulated = BoundaryPolicy::InsulatedOrigin;
/// assert!(!insulated.is_fixed(0, 11));
/// assert!(insulated.is_fixed(10, 11));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Every edge held at its initial value
    #[default]
    Dirichlet,

    /// Zero-flux wall at `x = 0` (and `y = 0`), fixed edge at `x = L` (and `y = L`)
    InsulatedOrigin,
}

impl BoundaryPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            BoundaryPolicy::Dirichlet => "Dirichlet",
            BoundaryPolicy::InsulatedOrigin => "Insulated origin",
        }
    }

    /// True when the lower end of each axis is an insulated wall
    pub fn is_insulated_origin(&self) -> bool {
        matches!(self, BoundaryPolicy::InsulatedOrigin)
    }

    /// Whether node `index` of a line of `points` nodes is held fixed
    pub fn is_fixed(&self, index: usize, points: usize) -> bool {
        match self {
            BoundaryPolicy::Dirichlet => index == 0 || index + 1 == points,
            BoundaryPolicy::InsulatedOrigin => index + 1 == points,
        }
    }

    /// Range of nodes a line solve updates
    pub fn free_range(&self, points: usize) -> std::ops::Range<usize> {
        match self {
            BoundaryPolicy::Dirichlet => 1..points - 1,
            BoundaryPolicy::InsulatedOrigin => 0..points - 1,
        }
    }
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
