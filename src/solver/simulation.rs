//! Simulation: the solver picked by a configuration
//!
//! [`Simulation`] is what an application holds: it is built from a
//! [`SimulationConfig`], dispatches to the 1D or 2D solver according to
//! [`SimType`], and can run a whole simulation while recording a trajectory.

use crate::error::{HeatError, Result};
use crate::physics::TemperatureField;
use crate::solver::{
    AdiSolver2D, HeatSolver, ImplicitSolver1D, SimType, SimulationConfig, SimulationResult,
    SolverStatus, StepOutcome,
};
use log::debug;

/// A 1D or 2D heat simulation
///
/// # Example
///
/// ```rust
/// use heat_rs::physics::Material;
/// use heat_rs::solver::{HeatSolver, SimType, Simulation, SimulationConfig};
///
/// let config = SimulationConfig::new(SimType::TwoD, Material::iron(), 0.5, 60.0, 293.15, 0.0)
///     .with_grid_points(31)
///     .with_time_steps(60);
///
/// let mut simulation = Simulation::new(&config).unwrap();
/// let result = simulation.run(10).unwrap();
///
/// assert!(simulation.is_completed());
/// assert_eq!(result.len(), 7); // t = 0, 10, ..., 60
/// ```
#[derive(Debug, Clone)]
pub enum Simulation {
    OneD(ImplicitSolver1D),
    TwoD(AdiSolver2D),
}

impl Simulation {
    /// Build the solver matching `config.sim_type`
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        Ok(match config.sim_type {
            SimType::OneD => Simulation::OneD(ImplicitSolver1D::new(config)?),
            SimType::TwoD => Simulation::TwoD(AdiSolver2D::new(config)?),
        })
    }

    pub fn sim_type(&self) -> SimType {
        match self {
            Simulation::OneD(_) => SimType::OneD,
            Simulation::TwoD(_) => SimType::TwoD,
        }
    }

    pub fn as_one_d(&self) -> Option<&ImplicitSolver1D> {
        match self {
            Simulation::OneD(solver) => Some(solver),
            Simulation::TwoD(_) => None,
        }
    }

    pub fn as_two_d(&self) -> Option<&AdiSolver2D> {
        match self {
            Simulation::TwoD(solver) => Some(solver),
            Simulation::OneD(_) => None,
        }
    }

    fn solver(&self) -> &dyn HeatSolver {
        match self {
            Simulation::OneD(solver) => solver,
            Simulation::TwoD(solver) => solver,
        }
    }

    fn solver_mut(&mut self) -> &mut dyn HeatSolver {
        match self {
            Simulation::OneD(solver) => solver,
            Simulation::TwoD(solver) => solver,
        }
    }

    /// r = α·Δt / Δx²
    pub fn mesh_ratio(&self) -> f64 {
        match self {
            Simulation::OneD(solver) => solver.mesh_ratio(),
            Simulation::TwoD(solver) => solver.mesh_ratio(),
        }
    }

    /// Step until `tmax`, recording the field every `record_every` steps
    ///
    /// The current state and the final state are always recorded. Stepping
    /// starts from wherever the simulation currently is.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` when `record_every` is 0
    /// - `Numerical` from the first failing step
    pub fn run(&mut self, record_every: usize) -> Result<SimulationResult> {
        // ====== Step 1: Validation ======

        if record_every == 0 {
            return Err(HeatError::invalid("record_every", "must be greater than 0"));
        }

        // ====== Step 2: Setup ======

        let remaining = self.time_steps().saturating_sub(self.steps_taken());
        let capacity = remaining / record_every + 2;
        let mut time_points = Vec::with_capacity(capacity);
        let mut trajectory: Vec<TemperatureField> = Vec::with_capacity(capacity);

        time_points.push(self.time());
        trajectory.push(self.field());

        // ====== Step 3: Time integration ======

        while self.step()? == StepOutcome::Advanced {
            if self.steps_taken() % record_every == 0 || self.is_completed() {
                time_points.push(self.time());
                trajectory.push(self.field());
            }
        }

        // ====== Step 4: Build result ======

        let mut result = SimulationResult::new(time_points, trajectory, self.field());

        result.add_metadata("solver", self.name());
        result.add_metadata("time steps", &self.time_steps().to_string());
        result.add_metadata("dt", &self.time_step().to_string());
        result.add_metadata("total time", &self.tmax().to_string());
        result.add_metadata("grid points", &self.grid_points().to_string());
        result.add_metadata("mesh ratio", &self.mesh_ratio().to_string());
        match self {
            Simulation::OneD(solver) => {
                result.add_metadata("material", solver.material().name());
                result.add_metadata("boundary", solver.boundary().name());
            }
            Simulation::TwoD(solver) => {
                result.add_metadata("material", solver.material().name());
                result.add_metadata("boundary", solver.boundary().name());
                result.add_metadata("scheme", solver.scheme().name());
            }
        }

        debug!("{}: recorded {} states", self.name(), result.len());

        Ok(result)
    }
}

impl HeatSolver for Simulation {
    fn step(&mut self) -> Result<StepOutcome> {
        self.solver_mut().step()
    }

    fn status(&self) -> SolverStatus {
        self.solver().status()
    }

    fn time(&self) -> f64 {
        self.solver().time()
    }

    fn tmax(&self) -> f64 {
        self.solver().tmax()
    }

    fn time_step(&self) -> f64 {
        self.solver().time_step()
    }

    fn time_steps(&self) -> usize {
        self.solver().time_steps()
    }

    fn steps_taken(&self) -> usize {
        self.solver().steps_taken()
    }

    fn grid_points(&self) -> usize {
        self.solver().grid_points()
    }

    fn field(&self) -> TemperatureField {
        self.solver().field()
    }

    fn reset(&mut self) {
        self.solver_mut().reset()
    }

    fn name(&self) -> &'static str {
        self.solver().name()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Material;

    fn config(sim_type: SimType) -> SimulationConfig {
        SimulationConfig::new(sim_type, Material::glass(), 0.1, 20.0, 293.15, 0.0)
            .with_grid_points(11)
            .with_time_steps(20)
    }

    #[test]
    fn test_dispatch_by_sim_type() {
        let one = Simulation::new(&config(SimType::OneD)).unwrap();
        assert_eq!(one.sim_type(), SimType::OneD);
        assert_eq!(one.name(), "Backward Euler 1D");
        assert!(one.as_one_d().is_some());
        assert!(one.as_two_d().is_none());
        assert!(one.field().is_line());

        let two = Simulation::new(&config(SimType::TwoD)).unwrap();
        assert_eq!(two.sim_type(), SimType::TwoD);
        assert_eq!(two.name(), "ADI 2D");
        assert!(two.field().is_plate());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let bad = SimulationConfig { tmax: 0.0, ..config(SimType::OneD) };
        assert!(Simulation::new(&bad).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_run_records_expected_time_points() {
        let mut simulation = Simulation::new(&config(SimType::OneD)).unwrap();
        let result = simulation.run(6).unwrap();

        // steps 0, 6, 12, 18 and the final step 20
        assert_eq!(result.len(), 5);
        assert_eq!(result.trajectory.len(), 5);
        assert_eq!(result.time_points[0], 0.0);
        assert_eq!(result.time_points[1], 6.0);
        assert_eq!(result.final_time(), Some(20.0));
        assert_eq!(result.trajectory.last(), Some(&result.final_field));
        assert_eq!(result.metadata.get("solver").map(String::as_str), Some("Backward Euler 1D"));
        assert_eq!(result.metadata.get("material").map(String::as_str), Some("Glass"));
    }

    #[test]
    fn test_run_rejects_zero_interval() {
        let mut simulation = Simulation::new(&config(SimType::TwoD)).unwrap();
        assert!(simulation.run(0).unwrap_err().is_invalid_parameter());
        assert_eq!(simulation.steps_taken(), 0);
    }

    #[test]
    fn test_run_on_completed_simulation() {
        let mut simulation = Simulation::new(&config(SimType::TwoD)).unwrap();
        simulation.run(5).unwrap();

        let again = simulation.run(5).unwrap();
        assert_eq!(again.len(), 1);
        assert_eq!(again.final_time(), Some(20.0));
    }
}
