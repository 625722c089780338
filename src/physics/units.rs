//! Temperature unit helpers
//!
//! The solvers are unit-agnostic: whatever scale the initial temperature is
//! given in, the field comes back in. These helpers cover the Celsius/Kelvin
//! round trip used when parameters are entered in °C.

/// Offset between the Celsius and Kelvin scales
pub const KELVIN_OFFSET: f64 = 273.15;

#[inline]
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}

#[inline]
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}
