//! Materials and initial fields shared by the integration tests

use heat_rs::physics::Material;
use nalgebra::DMatrix;
use std::f64::consts::PI;

/// λ = ρ = c = 1, so α = 1
pub fn unit_material() -> Material {
    Material::new("Unit", 1.0, 1.0, 1.0).unwrap()
}

/// `sin(πx)` on `points` nodes over `[0, 1]`
pub fn sine_mode_line(points: usize) -> Vec<f64> {
    let dx = 1.0 / (points - 1) as f64;
    (0..points).map(|i| (PI * i as f64 * dx).sin()).collect()
}

/// `sin(πx)·sin(πy)` on a `points × points` plate over `[0, 1]²`
pub fn sine_mode_plate(points: usize) -> DMatrix<f64> {
    let line = sine_mode_line(points);
    DMatrix::from_fn(points, points, |i, j| line[i] * line[j])
}

/// Zero plate with a single hot node in the middle
pub fn hot_spot(points: usize, value: f64) -> DMatrix<f64> {
    let mut field = DMatrix::zeros(points, points);
    field[(points / 2, points / 2)] = value;
    field
}
