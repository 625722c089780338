//! Heat source terms
//!
//! A source is sampled once, when a solver is built, into a per-node forcing
//! rate `s` [K/s]. Each backward-Euler step then adds `Δt·s[i]` to the
//! right-hand side of node `i`.
//!
//! # Profiles
//!
//! - [`SourceTerm::Uniform`]: the rate `f` itself, identical at every node.
//! - [`SourceTerm::Bands`] (1D): two heating bands along the bar,
//!
//!   ```text
//!   F(x) = tmax·f²        on [L/10, 2L/10]
//!   F(x) = 0.75·tmax·f²   on [5L/10, 6L/10]
//!   F(x) = 0              elsewhere
//!   ```
//!
//! - [`SourceTerm::Patches`] (2D): four square heaters on the plate,
//!
//!   ```text
//!   F(x, y) = tmax·f²   on [L/6, 2L/6] ∪ [4L/6, 5L/6] in each axis
//!   F(x, y) = 0         elsewhere
//!   ```
//!
//! Volumetric profiles are given in W/m³ and become a rate through `F/(ρ·c)`.

use crate::error::{ensure_finite, HeatError, Result};
use crate::physics::Material;
use nalgebra::{DMatrix, DVector};
use std::fmt;

/// Heat source applied at every step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceTerm {
    /// Uniform forcing rate [K/s]
    Uniform(f64),

    /// Two heating bands along a bar (1D only)
    Bands { amplitude: f64 },

    /// Four square heaters on a plate (2D only)
    Patches { amplitude: f64 },
}

impl SourceTerm {
    /// No heating at all
    pub fn none() -> Self {
        SourceTerm::Uniform(0.0)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceTerm::Uniform(_) => "Uniform",
            SourceTerm::Bands { .. } => "Bands",
            SourceTerm::Patches { .. } => "Patches",
        }
    }

    /// Spatial dimension the profile is defined for (`None` = any)
    pub fn dimension(&self) -> Option<usize> {
        match self {
            SourceTerm::Uniform(_) => None,
            SourceTerm::Bands { .. } => Some(1),
            SourceTerm::Patches { .. } => Some(2),
        }
    }

    /// Check the source is finite and usable in `ndim` dimensions
    pub fn validate(&self, ndim: usize) -> Result<()> {
        let value = match self {
            SourceTerm::Uniform(rate) => *rate,
            SourceTerm::Bands { amplitude } | SourceTerm::Patches { amplitude } => *amplitude,
        };
        ensure_finite("source", value)?;

        if let Some(expected) = self.dimension()
            && expected != ndim
        {
            return Err(HeatError::invalid(
                "source",
                format!("{} profile is {}D only, used in a {}D simulation", self.name(), expected, ndim),
            ));
        }
        Ok(())
    }

    /// Per-node forcing rate on a bar of `points` nodes
    pub fn sample_line(
        &self,
        material: &Material,
        length: f64,
        tmax: f64,
        points: usize,
    ) -> Result<DVector<f64>> {
        self.validate(1)?;
        ensure_grid(points)?;
        let dx = length / (points - 1) as f64;

        let rates = match *self {
            SourceTerm::Uniform(rate) => DVector::from_element(points, rate),
            SourceTerm::Bands { amplitude } => {
                let peak = tmax * amplitude * amplitude;
                let rho_c = material.volumetric_heat_capacity();

                DVector::from_fn(points, |i, _| {
                    let x = i as f64 * dx;
                    if in_band(x, length / 10.0, 2.0 * length / 10.0) {
                        peak / rho_c
                    } else if in_band(x, 5.0 * length / 10.0, 6.0 * length / 10.0) {
                        0.75 * peak / rho_c
                    } else {
                        0.0
                    }
                })
            }
            // validate(1) rejected it already
            SourceTerm::Patches { .. } => unreachable!("patch source on a 1D grid"),
        };

        Ok(rates)
    }

    /// Per-node forcing rate on a `points × points` plate, indexed `(i, j)`
    pub fn sample_plate(
        &self,
        material: &Material,
        length: f64,
        tmax: f64,
        points: usize,
    ) -> Result<DMatrix<f64>> {
        self.validate(2)?;
        ensure_grid(points)?;
        let dx = length / (points - 1) as f64;

        let rates = match *self {
            SourceTerm::Uniform(rate) => DMatrix::from_element(points, points, rate),
            SourceTerm::Patches { amplitude } => {
                let rate = tmax * amplitude * amplitude / material.volumetric_heat_capacity();
                let sixth = length / 6.0;
                let in_patch_axis = |s: f64| {
                    in_band(s, sixth, 2.0 * sixth) || in_band(s, 4.0 * sixth, 5.0 * sixth)
                };

                DMatrix::from_fn(points, points, |i, j| {
                    let x = i as f64 * dx;
                    let y = j as f64 * dx;
                    if in_patch_axis(x) && in_patch_axis(y) { rate } else { 0.0 }
                })
            }
            SourceTerm::Bands { .. } => unreachable!("band source on a 2D grid"),
        };

        Ok(rates)
    }
}

impl Default for SourceTerm {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for SourceTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceTerm::Uniform(rate) => write!(f, "Uniform ({})", rate),
            SourceTerm::Bands { amplitude } => write!(f, "Bands (f={})", amplitude),
            SourceTerm::Patches { amplitude } => write!(f, "Patches (f={})", amplitude),
        }
    }
}

fn ensure_grid(points: usize) -> Result<()> {
    if points < 3 {
        return Err(HeatError::invalid(
            "grid_points",
            format!("need at least 3 points, got {}", points),
        ));
    }
    Ok(())
}

#[inline]
fn in_band(s: f64, lower: f64, upper: f64) -> bool {
    s >= lower && s <= upper
}

// =================================================================================================
// Tests
// =================================================================================================
