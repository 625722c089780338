//! heat-rs: Heat Conduction Simulation
//!
//! Implicit finite-difference solvers for the heat equation on a bar (1D) and
//! on a square plate (2D). Built with Rust for performance and safety.
//!
//! # Architecture
//!
//! heat-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - [`physics`] describes the material, the heat sources and the field
//!    - [`solver`] advances the field in time (backward Euler in 1D,
//!      Peaceman–Rachford ADI in 2D, both built on the Thomas algorithm)
//!
//! 2. **Step-by-step ownership**
//!    - A solver owns its field and mutates it only in `step()` and `reset()`
//!    - Readers (renderers, recorders) take snapshots between two steps
//!
//! # Quick Start
//!
//! ```rust
//! use heat_rs::prelude::*;
//!
//! # fn main() -> heat_rs::error::Result<()> {
//! // 1. Describe the problem: a 1 m glass bar at 13 °C, heated by two bands
//! let config = SimulationConfig::new(SimType::OneD, Material::glass(), 1.0, 16.0, 0.0, 0.0)
//!     .with_initial_temperature_celsius(13.0)
//!     .with_source(SourceTerm::Bands { amplitude: 80.0 })
//!     .with_grid_points(201);
//!
//! // 2. Build the solver
//! let mut simulation = Simulation::new(&config)?;
//!
//! // 3. Step it, one frame at a time
//! while !simulation.is_completed() {
//!     simulation.step()?;
//! }
//!
//! // 4. Read the field
//! let field = simulation.field();
//! assert!(field.max() > 286.15);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Material, source terms, temperature field
//! - [`solver`]: Tridiagonal solver, 1D and 2D heat solvers, simulation driver
//! - [`error`]: Error type shared by every fallible operation
//!
//! # Features
//!
//! - `parallel` (default): solve the lines of each ADI sweep on the Rayon
//!   thread pool for plates larger than
//!   [`parallel_threshold()`](solver::parallel_threshold)

// Core modules
pub mod error;
pub mod physics;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use heat_rs::prelude::*;
    //! ```
    pub use crate::error::{HeatError, Result};
    pub use crate::physics::{Material, SourceTerm, TemperatureField};
    pub use crate::solver::{
        AdiSolver2D,
        BoundaryPolicy,
        HeatSolver,
        ImplicitSolver1D,
        SimType,
        Simulation,
        SimulationConfig,
        SimulationResult,
        Snapshot,
        SolverStatus,
        StepOutcome,
    };
}
