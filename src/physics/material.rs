//! Thermal material properties
//!
//! # Mathematical Background
//!
//! Heat conduction in a homogeneous solid follows
//!
//! ```text
//! ρ·c·∂u/∂t = λ·∇²u + F
//! ```
//!
//! Dividing by ρ·c gives the form the solvers integrate:
//!
//! ```text
//! ∂u/∂t = α·∇²u + F/(ρ·c)        with α = λ/(ρ·c)
//! ```
//!
//! Where:
//! - **λ** : Thermal conductivity [W/(m·K)]
//! - **ρ** : Density [kg/m³]
//! - **c** : Specific heat capacity [J/(kg·K)]
//! - **α** : Thermal diffusivity [m²/s]

use crate::error::{ensure_positive, Result};
use std::fmt;

// =================================================================================================
// Material
// =================================================================================================

/// Physical properties of a conducting material
///
/// A `Material` is immutable once built: the three properties are private and
/// validated by [`Material::new`]. Solvers receive a clone, never a mutable
/// reference.
///
/// # Example
///
/// ```rust
/// use heat_rs::physics::Material;
///
/// let copper = Material::copper();
/// assert!((copper.diffusivity() - 389.0 / (8940.0 * 380.0)).abs() < 1e-15);
///
/// let custom = Material::new("Unit", 1.0, 1.0, 1.0).unwrap();
/// assert_eq!(custom.diffusivity(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    name: String,

    /// Thermal conductivity λ [W/(m·K)]
    conductivity: f64,

    /// Density ρ [kg/m³]
    density: f64,

    /// Specific heat capacity c [J/(kg·K)]
    specific_heat: f64,
}

impl Material {
    /// Creates a material from its conductivity, density and specific heat
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when any property is not strictly positive
    /// and finite.
    pub fn new(
        name: impl Into<String>,
        conductivity: f64,
        density: f64,
        specific_heat: f64,
    ) -> Result<Self> {
        ensure_positive("conductivity", conductivity)?;
        ensure_positive("density", density)?;
        ensure_positive("specific_heat", specific_heat)?;

        Ok(Self {
            name: name.into(),
            conductivity,
            density,
            specific_heat,
        })
    }

    // ====================================== Presets ==============================================

    /// Copper: λ = 389 W/(m·K), ρ = 8940 kg/m³, c = 380 J/(kg·K)
    pub fn copper() -> Self {
        Self::preset("Copper", 389.0, 8940.0, 380.0)
    }

    /// Iron: λ = 80.2 W/(m·K), ρ = 7874 kg/m³, c = 440 J/(kg·K)
    pub fn iron() -> Self {
        Self::preset("Iron", 80.2, 7874.0, 440.0)
    }

    /// Glass: λ = 1.2 W/(m·K), ρ = 2530 kg/m³, c = 840 J/(kg·K)
    pub fn glass() -> Self {
        Self::preset("Glass", 1.2, 2530.0, 840.0)
    }

    /// Polystyrene: λ = 0.1 W/(m·K), ρ = 1040 kg/m³, c = 1200 J/(kg·K)
    pub fn polystyrene() -> Self {
        Self::preset("Polystyrene", 0.1, 1040.0, 1200.0)
    }

    /// All built-in presets, from the best to the worst conductor
    pub fn presets() -> [Material; 4] {
        [Self::copper(), Self::iron(), Self::glass(), Self::polystyrene()]
    }

    /// Looks a preset up by name (case-insensitive)
    pub fn preset_by_name(name: &str) -> Option<Material> {
        Self::presets()
            .into_iter()
            .find(|material| material.name.eq_ignore_ascii_case(name))
    }

    // Presets bypass validation: their constants are known to be positive.
    fn preset(name: &str, conductivity: f64, density: f64, specific_heat: f64) -> Self {
        Self {
            name: name.to_string(),
            conductivity,
            density,
            specific_heat,
        }
    }

    // ===================================== Accessors =============================================

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn conductivity(&self) -> f64 {
        self.conductivity
    }

    #[inline]
    pub fn density(&self) -> f64 {
        self.density
    }

    #[inline]
    pub fn specific_heat(&self) -> f64 {
        self.specific_heat
    }

    /// Volumetric heat capacity ρ·c [J/(m³·K)]
    #[inline]
    pub fn volumetric_heat_capacity(&self) -> f64 {
        self.density * self.specific_heat
    }

    /// Thermal diffusivity α = λ/(ρ·c) [m²/s]
    #[inline]
    pub fn diffusivity(&self) -> f64 {
        self.conductivity / self.volumetric_heat_capacity()
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (λ={}, ρ={}, c={}, α={:.3e})",
            self.name,
            self.conductivity,
            self.density,
            self.specific_heat,
            self.diffusivity()
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================
