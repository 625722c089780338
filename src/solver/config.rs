//! Simulation configuration
//!
//! A [`SimulationConfig`] gathers everything needed to build a solver: the
//! dimensionality, the material, the domain, the time horizon, the initial
//! temperature and the source. Discretization settings start from the
//! defaults below and can be overridden with the `with_*` setters.
//!
//! # Examples
//!
//! ```rust
//! use heat_rs::physics::Material;
//! use heat_rs::solver::{BoundaryPolicy, SimType, SimulationConfig};
//!
//! let config = SimulationConfig::new(SimType::OneD, Material::glass(), 1.0, 16.0, 286.15, 0.0)
//!     .with_grid_points(201)
//!     .with_boundary(BoundaryPolicy::InsulatedOrigin);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.time_steps, 1000);
//! assert!((config.time_step() - 0.016).abs() < 1e-15);
//! ```

use crate::error::{ensure_finite, ensure_positive, HeatError, Result};
use crate::physics::{celsius_to_kelvin, Material, SourceTerm};
use crate::solver::BoundaryPolicy;
use std::fmt;

/// Default number of nodes of a bar
pub const DEFAULT_GRID_POINTS_1D: usize = 1001;

/// Default number of nodes per side of a plate
pub const DEFAULT_GRID_POINTS_2D: usize = 101;

/// Default number of time steps over `[0, tmax]`
pub const DEFAULT_TIME_STEPS: usize = 1000;

/// Smallest usable grid: two edges and one free node
pub const MIN_GRID_POINTS: usize = 3;

// =================================================================================================
// Simulation type
// =================================================================================================

/// Dimensionality of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimType {
    /// Bar over `[0, L]`
    OneD,

    /// Square plate over `[0, L] × [0, L]`
    TwoD,
}

impl SimType {
    pub fn ndim(&self) -> usize {
        match self {
            SimType::OneD => 1,
            SimType::TwoD => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SimType::OneD => "1D",
            SimType::TwoD => "2D",
        }
    }

    pub fn default_grid_points(&self) -> usize {
        match self {
            SimType::OneD => DEFAULT_GRID_POINTS_1D,
            SimType::TwoD => DEFAULT_GRID_POINTS_2D,
        }
    }
}

impl fmt::Display for SimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =================================================================================================
// ADI time splitting
// =================================================================================================

/// Mesh ratio up to which the Peaceman–Rachford explicit half steps keep
/// non-negative weights (`1 − r ≥ 0`)
pub const MONOTONE_MESH_RATIO: f64 = 1.0;

/// Time splitting used by the 2D solver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdiScheme {
    /// Peaceman–Rachford while `r ≤ 1`, split backward Euler above
    #[default]
    Auto,

    /// Second order in time, but over- and undershoots once `r > 1`
    PeacemanRachford,

    /// `(I − r·Lx)·u* = uⁿ + Δt·s`, then `(I − r·Ly)·uⁿ⁺¹ = u*`
    ///
    /// First order in time, obeys the maximum principle for every `r`.
    SplitBackwardEuler,
}

impl AdiScheme {
    pub fn name(&self) -> &'static str {
        match self {
            AdiScheme::Auto => "Auto",
            AdiScheme::PeacemanRachford => "Peaceman-Rachford",
            AdiScheme::SplitBackwardEuler => "Split backward Euler",
        }
    }

    /// Concrete scheme for a mesh ratio, never `Auto`
    pub fn resolve(self, mesh_ratio: f64) -> AdiScheme {
        match self {
            AdiScheme::Auto if mesh_ratio <= MONOTONE_MESH_RATIO => AdiScheme::PeacemanRachford,
            AdiScheme::Auto => AdiScheme::SplitBackwardEuler,
            scheme => scheme,
        }
    }
}

impl fmt::Display for AdiScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =================================================================================================
// Simulation configuration
// =================================================================================================

/// Parameters of a heat-conduction simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub sim_type: SimType,

    pub material: Material,

    /// Domain length L [m]
    pub length: f64,

    /// Time horizon [s]
    pub tmax: f64,

    /// Initial temperature u0, uniform over the domain
    pub initial_temperature: f64,

    pub source: SourceTerm,

    /// Nodes per axis, edges included
    pub grid_points: usize,

    pub time_steps: usize,

    pub boundary: BoundaryPolicy,

    /// Value the fixed edges are held at (defaults to the initial temperature)
    pub boundary_temperature: Option<f64>,

    /// Time splitting of the 2D solver, ignored in 1D
    pub adi_scheme: AdiScheme,
}

impl SimulationConfig {
    /// Configuration with a uniform forcing rate `f` and default discretization
    pub fn new(
        sim_type: SimType,
        material: Material,
        length: f64,
        tmax: f64,
        initial_temperature: f64,
        f: f64,
    ) -> Self {
        Self {
            sim_type,
            material,
            length,
            tmax,
            initial_temperature,
            source: SourceTerm::Uniform(f),
            grid_points: sim_type.default_grid_points(),
            time_steps: DEFAULT_TIME_STEPS,
            boundary: BoundaryPolicy::default(),
            boundary_temperature: None,
            adi_scheme: AdiScheme::default(),
        }
    }

    // ====================================== Setters ==============================================

    pub fn with_grid_points(mut self, grid_points: usize) -> Self {
        self.grid_points = grid_points;
        self
    }

    pub fn with_time_steps(mut self, time_steps: usize) -> Self {
        self.time_steps = time_steps;
        self
    }

    pub fn with_source(mut self, source: SourceTerm) -> Self {
        self.source = source;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_boundary_temperature(mut self, temperature: f64) -> Self {
        self.boundary_temperature = Some(temperature);
        self
    }

    pub fn with_adi_scheme(mut self, scheme: AdiScheme) -> Self {
        self.adi_scheme = scheme;
        self
    }

    /// Set the initial temperature from degrees Celsius, stored in Kelvin
    pub fn with_initial_temperature_celsius(mut self, celsius: f64) -> Self {
        self.initial_temperature = celsius_to_kelvin(celsius);
        self
    }

    // ==================================== Derived values =========================================

    /// Δt = tmax / time_steps
    pub fn time_step(&self) -> f64 {
        self.tmax / self.time_steps as f64
    }

    /// Δx = L / (N − 1)
    pub fn dx(&self) -> f64 {
        self.length / self.grid_points.saturating_sub(1) as f64
    }

    /// r = α·Δt / Δx²
    pub fn mesh_ratio(&self) -> f64 {
        let dx = self.dx();
        self.material.diffusivity() * self.time_step() / (dx * dx)
    }

    /// Temperature of the fixed edges
    pub fn edge_temperature(&self) -> f64 {
        self.boundary_temperature.unwrap_or(self.initial_temperature)
    }

    /// Validate every parameter
    ///
    /// The material validated itself when it was built; everything else is
    /// checked here.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("length", self.length)?;
        ensure_positive("tmax", self.tmax)?;
        ensure_finite("initial_temperature", self.initial_temperature)?;

        if self.grid_points < MIN_GRID_POINTS {
            return Err(HeatError::invalid(
                "grid_points",
                format!("need at least {} points, got {}", MIN_GRID_POINTS, self.grid_points),
            ));
        }
        if self.time_steps == 0 {
            return Err(HeatError::invalid("time_steps", "must be greater than 0"));
        }
        if let Some(temperature) = self.boundary_temperature {
            ensure_finite("boundary_temperature", temperature)?;
        }

        self.source.validate(self.sim_type.ndim())?;

        // Extreme but finite inputs can still overflow the derived steps
        ensure_positive("time_step", self.time_step())?;
        ensure_positive("mesh_ratio", self.mesh_ratio())?;

        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
