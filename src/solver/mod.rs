//! Numerical solvers for the heat equation
//!
//! This module turns a [`SimulationConfig`] into a solver and advances the
//! temperature field one time step at a time.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Configuration** (`SimulationConfig`) - WHAT to solve
//!    - Dimensionality (`SimType`), material, domain length, time horizon
//!    - Initial temperature, source term, boundary policy
//!    - Grid points and time steps
//!
//! 2. **Solver** (`HeatSolver` trait) - HOW to solve
//!    - `ImplicitSolver1D`: backward Euler, one tridiagonal solve per step
//!    - `AdiSolver2D`: Peaceman–Rachford ADI, one tridiagonal solve per line
//!      and per sweep
//!
//! 3. **Simulation** (`Simulation`) - the solver picked by the configuration
//!    - Step-by-step driving for interactive front ends
//!    - `run()` to completion with a recorded trajectory
//!
//! # Module Organization
//!
//! - **`traits`**: `HeatSolver`, `SolverStatus`, `StepOutcome`, `Snapshot`,
//!   `SimulationResult`
//! - **`boundary`**: `BoundaryPolicy`
//! - **`config`**: `SimType`, `SimulationConfig`
//! - **`simulation`**: `Simulation`
//! - **`methods`**: the Thomas algorithm and the two solvers
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌──────────────────┐
//! │ SimulationConfig │ ← WHAT to solve
//! └────────┬─────────┘
//!          │ validate()
//! ┌────────▼─────────┐
//! │ Simulation       │ ← 1D or 2D solver
//! └────────┬─────────┘
//!          │ step() × time_steps
//! ┌────────▼─────────┐
//! │ Thomas algorithm │ ← one or 2N tridiagonal solves
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │ Snapshot /       │ ← read between two steps
//! │ SimulationResult │
//! └──────────────────┘
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use heat_rs::physics::Material;
//! use heat_rs::solver::{HeatSolver, SimType, Simulation, SimulationConfig, StepOutcome};
//!
//! let config = SimulationConfig::new(SimType::OneD, Material::copper(), 1.0, 5.0, 293.15, 0.5)
//!     .with_grid_points(51)
//!     .with_time_steps(50);
//!
//! let mut simulation = Simulation::new(&config).unwrap();
//! while simulation.step().unwrap() == StepOutcome::Advanced {
//!     let snapshot = simulation.snapshot();
//!     assert!(snapshot.field.is_finite());
//! }
//! assert!(simulation.is_completed());
//! ```
//!
//! # Error Handling
//!
//! Every fallible operation returns [`crate::error::Result`]:
//!
//! - Invalid configuration (non-positive length or horizon, fewer than three
//!   grid points, source profile of the wrong dimension) is reported as
//!   `InvalidParameter` at construction.
//! - A breakdown during `step()` (zero pivot, non-finite field) is reported
//!   as `Numerical` and the step is discarded.

// =================================================================================================
// Module Declarations
// =================================================================================================
mod traits;
mod boundary;
mod config;
mod methods;
mod simulation;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// An ADI sweep solves N independent lines of N nodes. On small plates the
// whole sweep costs less than handing the lines to Rayon, so the sweep only
// goes parallel once the plate holds more nodes than the threshold. The value
// lives in an AtomicUsize: benchmarks and tests can move it at runtime and
// every sweep reads it with a single relaxed load.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default plate size, in nodes, up to which ADI sweeps stay sequential
///
/// A 31 × 31 plate (961 nodes) is swept on the calling thread, a 32 × 32
/// plate (1 024 nodes) on Rayon.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Plate size, in nodes, above which [`AdiSolver2D`] solves the lines of a
/// sweep in parallel
///
/// Only effective when the crate is compiled with the `parallel` feature.
/// Results do not depend on it: every line is solved the same way on either
/// path.
///
/// # Example
///
/// ```rust
/// use heat_rs::solver::parallel_threshold;
///
/// // a 101 × 101 plate is swept in parallel by default
/// assert!(101 * 101 > parallel_threshold());
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Move the plate size above which ADI sweeps go parallel
///
/// `usize::MAX` keeps every sweep sequential, `1` sends every plate to Rayon.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use heat_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(64 * 64);
/// assert_eq!(parallel_threshold(), 4096);
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Serializes the tests that move the threshold
#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Test-only guard: holds the threshold lock, sets a value, and puts the
/// previous value back on drop
///
/// Tests that move the threshold run one at a time, so a guard always
/// restores the value it found.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        // a failed assertion in another guarded test must not block the rest
        let lock = THRESHOLD_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self {
            previous,
            _lock: lock,
        }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{
    HeatSolver,
    SimulationResult,
    Snapshot,
    SolverStatus,
    StepOutcome,
};

pub use boundary::BoundaryPolicy;
pub use config::{
    AdiScheme,
    SimType,
    SimulationConfig,
    DEFAULT_GRID_POINTS_1D,
    DEFAULT_GRID_POINTS_2D,
    DEFAULT_TIME_STEPS,
    MIN_GRID_POINTS,
    MONOTONE_MESH_RATIO,
};
pub use simulation::Simulation;

pub use methods::{thomas_solve, AdiSolver2D, ImplicitSolver1D, TridiagonalSystem};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::error::{HeatError, Result};

/// Check a candidate field for NaN or Inf before it is committed
///
/// # Arguments
///
/// * `values` - Nodal values of the candidate field
/// * `step` - Step being computed (for error reporting)
///
/// # Example
///
/// ```rust,ignore
/// validate_field(next.as_slice(), 42)?;  // Validates the field of step 42
/// ```
pub(crate) fn validate_field(values: &[f64], step: usize) -> Result<()> {
    // NaN comes from 0/0 or Inf - Inf
    if let Some(node) = values.iter().position(|x| x.is_nan()) {
        return Err(HeatError::numerical(
            step,
            format!("NaN detected at node {}", node),
        ));
    }

    // Inf comes from overflow
    if let Some(node) = values.iter().position(|x| x.is_infinite()) {
        return Err(HeatError::numerical(
            step,
            format!("Infinity detected at node {}", node),
        ));
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_splits_small_and_large_plates() {
        let _guard = ThresholdGuard::save(DEFAULT_PARALLEL_THRESHOLD);
        assert!(31 * 31 <= parallel_threshold());
        assert!(32 * 32 > parallel_threshold());
        assert!(DEFAULT_GRID_POINTS_2D * DEFAULT_GRID_POINTS_2D > parallel_threshold());
    }

    #[test]
    fn test_guard_sets_plate_size() {
        let _guard = ThresholdGuard::save(64 * 64);
        assert_eq!(parallel_threshold(), 4096);
    }

    #[test]
    #[should_panic(expected = "parallel threshold must be at least 1")]
    fn test_zero_node_threshold_is_rejected() {
        set_parallel_threshold(0);
    }

    #[test]
    fn test_guard_restores_default_after_sweep_tuning() {
        {
            let _sequential = ThresholdGuard::save(usize::MAX);
            assert_eq!(parallel_threshold(), usize::MAX);
        }

        // every writer goes through a guard, so the next one finds the default
        let next = ThresholdGuard::save(1);
        assert_eq!(next.previous, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_sweep_workers_see_the_threshold() {
        use std::thread;

        let _guard = ThresholdGuard::save(40 * 40);

        let seen: Vec<usize> = (0..4)
            .map(|_| thread::spawn(parallel_threshold))
            .map(|handle| handle.join().unwrap())
            .collect();
        assert_eq!(seen, vec![1600; 4]);
    }

    #[test]
    fn test_validate_field() {
        assert!(validate_field(&[0.0, 1.0, -2.0], 1).is_ok());

        let error = validate_field(&[0.0, f64::NAN, 1.0], 4).unwrap_err();
        assert_eq!(error, HeatError::numerical(4, "NaN detected at node 1"));

        let error = validate_field(&[0.0, 1.0, f64::NEG_INFINITY], 2).unwrap_err();
        assert_eq!(error, HeatError::numerical(2, "Infinity detected at node 2"));
    }
}
