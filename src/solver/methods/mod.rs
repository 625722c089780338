//! Numerical methods for the heat equation
//!
//! This module contains the concrete implementations of the
//! [`HeatSolver`](crate::solver::HeatSolver) trait and the linear algebra
//! they are built on.
//!
//! # Architecture
//!
//! ```text
//!   ImplicitSolver1D ──┐
//!                      ├──▶ ImplicitOperator (stencil) ──▶ Thomas algorithm
//!   AdiSolver2D ───────┘
//! ```
//!
//! # Available Methods
//!
//! - **[`ImplicitSolver1D`]**: backward Euler on a bar
//!   - Order: first order in time, second order in space
//!   - Cost: one tridiagonal solve of size N per step
//!
//! - **[`AdiSolver2D`]**: Peaceman–Rachford ADI on a square plate
//!   - Order: second order in time and space
//!   - Cost: 2N tridiagonal solves of size N per step, independent within a
//!     sweep (Rayon with the `parallel` feature)
//!
//! - **[`thomas_solve`]** / **[`TridiagonalSystem`]**: O(n) elimination for
//!   tridiagonal systems, with pivot checks
//!
//! # Design Philosophy
//!
//! Each solver is:
//! - **Self-contained**: owns its field and its work buffers
//! - **Unconditionally stable**: any positive Δt gives a finite field
//! - **Atomic**: a failed step leaves the solver as it was

mod adi_2d;
mod implicit_1d;
mod stencil;
pub(crate) mod thomas;

// Re-exports for convenience
pub use adi_2d::AdiSolver2D;
pub use implicit_1d::ImplicitSolver1D;
pub use thomas::{thomas_solve, TridiagonalSystem};
