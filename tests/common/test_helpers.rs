//! Helper functions for integration tests

use heat_rs::physics::TemperatureField;
use heat_rs::solver::{HeatSolver, StepOutcome};

/// Assert that two fields are close (within tolerance)
pub fn assert_fields_close(
    field1: &TemperatureField,
    field2: &TemperatureField,
    tolerance: f64,
    message: &str,
) {
    assert_eq!(field1.shape(), field2.shape(), "{}: Dimension mismatch", message);

    for (i, (&v1, &v2)) in field1.values().iter().zip(field2.values()).enumerate() {
        let diff = (v1 - v2).abs();
        assert!(
            diff < tolerance,
            "{}: Node {} differs by {} (tolerance {})",
            message, i, diff, tolerance
        );
    }
}

/// Assert that every edge node of a plate holds exactly `value`
pub fn assert_edges_exact(field: &TemperatureField, value: f64) {
    let plate = field.try_as_plate().expect("edges are only defined on a plate");
    let n = plate.nrows();
    for k in 0..n {
        for (i, j) in [(0, k), (n - 1, k), (k, 0), (k, n - 1)] {
            assert_eq!(plate[(i, j)], value, "edge node ({}, {}) moved", i, j);
        }
    }
}

/// Step a solver until it completes, returning the number of steps taken
pub fn run_to_completion(solver: &mut dyn HeatSolver) -> usize {
    let mut steps = 0;
    while solver.step().unwrap() == StepOutcome::Advanced {
        steps += 1;
    }
    steps
}

/// Decay rate of the `sin(πx)` mode under the discrete Laplacian:
/// `4α/Δx²·sin²(πΔx/2)`
pub fn semi_discrete_decay_rate(diffusivity: f64, dx: f64) -> f64 {
    let s = (std::f64::consts::PI * dx / 2.0).sin();
    4.0 * diffusivity / (dx * dx) * s * s
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
