//! Solver trait and shared stepping types
//!
//! # Design Philosophy
//!
//! Both solvers follow the same life cycle and expose the same capability
//! set through [`HeatSolver`]:
//!
//! ```text
//!   Initialized ──step()──▶ Stepping ──step() at t = tmax──▶ Completed
//!        ▲                                                       │
//!        └──────────────────────── reset() ◀─────────────────────┘
//! ```
//!
//! - `step()` on a completed solver is a no-op reported as
//!   [`StepOutcome::AlreadyCompleted`].
//! - A failed `step()` leaves the field, the time and the step counter as
//!   they were before the call.
//! - Readers get owned copies ([`Snapshot`], [`TemperatureField`]) taken
//!   between two steps.

use crate::error::Result;
use crate::physics::TemperatureField;
use std::collections::HashMap;
use std::fmt;

// =================================================================================================
// Status
// =================================================================================================

/// Position of a solver in its life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Built or reset, no step taken yet
    Initialized,

    /// At least one step taken, `t < tmax`
    Stepping,

    /// `t = tmax`, further steps do nothing
    Completed,
}

impl SolverStatus {
    pub fn name(&self) -> &'static str {
        match self {
            SolverStatus::Initialized => "Initialized",
            SolverStatus::Stepping => "Stepping",
            SolverStatus::Completed => "Completed",
        }
    }

    /// Status after `steps` of `time_steps` steps
    pub(crate) fn from_progress(steps: usize, time_steps: usize) -> Self {
        if steps >= time_steps {
            SolverStatus::Completed
        } else if steps == 0 {
            SolverStatus::Initialized
        } else {
            SolverStatus::Stepping
        }
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What a call to `step()` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The field moved forward by one time step
    Advanced,

    /// The solver had already reached `tmax`; nothing changed
    AlreadyCompleted,
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// Common interface of the 1D and 2D heat solvers
///
/// Implementors own their field exclusively: `step()` and `reset()` take
/// `&mut self`, readers borrow between steps or take a [`Snapshot`].
pub trait HeatSolver: Send {
    /// Advance the field by one time step
    ///
    /// # Errors
    ///
    /// `Numerical` when the linear solve breaks down or the new field is not
    /// finite. The step is then discarded.
    fn step(&mut self) -> Result<StepOutcome>;

    fn status(&self) -> SolverStatus;

    fn is_completed(&self) -> bool {
        self.status() == SolverStatus::Completed
    }

    /// Current time `t = k·Δt`
    fn time(&self) -> f64;

    fn tmax(&self) -> f64;

    /// Δt
    fn time_step(&self) -> f64;

    /// Number of steps between 0 and tmax
    fn time_steps(&self) -> usize;

    /// Number of steps taken since construction or the last reset
    fn steps_taken(&self) -> usize;

    /// Nodes per axis
    fn grid_points(&self) -> usize;

    /// Owned copy of the current field
    fn field(&self) -> TemperatureField;

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            step: self.steps_taken(),
            time: self.time(),
            completed: self.is_completed(),
            field: self.field(),
        }
    }

    /// Restore the initial field and rewind to `t = 0`
    fn reset(&mut self);

    fn name(&self) -> &'static str;
}

// =================================================================================================
// Snapshot
// =================================================================================================

/// State of a solver between two steps
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub step: usize,
    pub time: f64,
    pub completed: bool,
    pub field: TemperatureField,
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Recorded trajectory of a simulation run
///
/// `time_points[k]` is the time of `trajectory[k]`. The first entry is always
/// the initial state and the last one the final state.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub time_points: Vec<f64>,
    pub trajectory: Vec<TemperatureField>,
    pub final_field: TemperatureField,
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    pub fn new(
        time_points: Vec<f64>,
        trajectory: Vec<TemperatureField>,
        final_field: TemperatureField,
    ) -> Self {
        Self {
            time_points,
            trajectory,
            final_field,
            metadata: HashMap::new(),
        }
    }

    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Number of recorded states
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    pub fn final_time(&self) -> Option<f64> {
        self.time_points.last().copied()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_progress() {
        assert_eq!(SolverStatus::from_progress(0, 10), SolverStatus::Initialized);
        assert_eq!(SolverStatus::from_progress(3, 10), SolverStatus::Stepping);
        assert_eq!(SolverStatus::from_progress(10, 10), SolverStatus::Completed);
    }

    #[test]
    fn test_result_metadata() {
        let field = TemperatureField::uniform_line(3, 0.0);
        let mut result = SimulationResult::new(vec![0.0, 1.0], vec![field.clone(), field.clone()], field);
        result.add_metadata("solver", "Backward Euler");

        assert_eq!(result.len(), 2);
        assert_eq!(result.final_time(), Some(1.0));
        assert_eq!(result.metadata.get("solver").map(String::as_str), Some("Backward Euler"));
    }
}
