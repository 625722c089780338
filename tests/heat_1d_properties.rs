//! Properties of the 1D backward Euler solver
//!
//! These tests check the guarantees every 1D run must keep, whatever the
//! material, grid or time step.

use heat_rs::error::HeatError;
use heat_rs::physics::{Material, SourceTerm};
use heat_rs::solver::{
    BoundaryPolicy, HeatSolver, ImplicitSolver1D, SimType, SimulationConfig, SolverStatus,
    StepOutcome,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod common;
use common::{relative_error, run_to_completion, unit_material};

fn random_config(rng: &mut StdRng) -> SimulationConfig {
    let presets = Material::presets();
    let material = presets[rng.gen_range(0..presets.len())].clone();

    SimulationConfig::new(
        SimType::OneD,
        material,
        rng.gen_range(0.01..2.0),
        rng.gen_range(0.1..1000.0),
        rng.gen_range(250.0..400.0),
        rng.gen_range(-5.0..5.0),
    )
    .with_grid_points(rng.gen_range(3..200))
    .with_time_steps(rng.gen_range(1..60))
}

#[test]
fn test_random_runs_stay_finite_with_exact_edges() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..40 {
        let config = random_config(&mut rng);
        let mut solver = ImplicitSolver1D::new(&config).unwrap();
        let n = config.grid_points;
        let left = solver.temperature()[0];
        let right = solver.temperature()[n - 1];

        run_to_completion(&mut solver);

        let u = solver.temperature();
        assert!(u.iter().all(|x| x.is_finite()), "non-finite field for {:?}", config);
        assert_eq!(u[0], left);
        assert_eq!(u[n - 1], right);
        assert_eq!(solver.time(), config.tmax);
    }
}

#[test]
fn test_uniform_field_is_invariant_for_every_preset() {
    for material in Material::presets() {
        let config = SimulationConfig::new(SimType::OneD, material, 1.0, 100.0, 286.15, 0.0)
            .with_grid_points(101)
            .with_time_steps(50);
        let mut solver = ImplicitSolver1D::new(&config).unwrap();

        run_to_completion(&mut solver);
        assert!(solver.temperature().iter().all(|&u| u == 286.15));
    }
}

#[test]
fn test_five_node_reference_step() {
    // N = 5, L = 1, α = 1, Δt = 0.01, u0 = 0, f = 1
    let config = SimulationConfig::new(SimType::OneD, unit_material(), 1.0, 1.0, 0.0, 1.0)
        .with_grid_points(5)
        .with_time_steps(100);
    let mut solver = ImplicitSolver1D::new(&config).unwrap();

    solver.step().unwrap();

    let u = solver.temperature();
    assert!(relative_error(u[1], 37.0 / 4228.0) < 1e-12);
    assert!(relative_error(u[2], 41.0 / 4228.0) < 1e-12);
    assert!(relative_error(u[3], 37.0 / 4228.0) < 1e-12);
    assert_eq!((u[0], u[4]), (0.0, 0.0));
}

#[test]
fn test_hot_spot_maximum_never_increases() {
    let config = SimulationConfig::new(SimType::OneD, Material::iron(), 0.2, 200.0, 0.0, 0.0)
        .with_grid_points(41)
        .with_time_steps(200);
    let mut profile = vec![0.0; 41];
    profile[20] = 500.0;
    let mut solver = ImplicitSolver1D::with_initial_profile(&config, &profile).unwrap();

    let mut previous = 500.0;
    while solver.step().unwrap() == StepOutcome::Advanced {
        let current = solver.field().max();
        assert!(current <= previous);
        previous = current;
    }
    assert!(previous < 500.0);
}

#[test]
fn test_terminal_steps_change_nothing() {
    let config = SimulationConfig::new(SimType::OneD, unit_material(), 1.0, 0.5, 0.0, 3.0)
        .with_grid_points(11)
        .with_time_steps(5);
    let mut solver = ImplicitSolver1D::new(&config).unwrap();

    assert_eq!(run_to_completion(&mut solver), 5);
    assert_eq!(solver.status(), SolverStatus::Completed);

    let before = solver.snapshot();
    for _ in 0..3 {
        assert_eq!(solver.step().unwrap(), StepOutcome::AlreadyCompleted);
    }
    assert_eq!(solver.snapshot(), before);
    assert_eq!(before.time, 0.5);
}

#[test]
fn test_converges_to_linear_steady_state() {
    // edges at 0 and 100, no source: steady state is u = 100·x
    let config = SimulationConfig::new(SimType::OneD, unit_material(), 1.0, 5.0, 0.0, 0.0)
        .with_grid_points(21)
        .with_time_steps(500);
    let mut profile = vec![0.0; 21];
    profile[20] = 100.0;
    let mut solver = ImplicitSolver1D::with_initial_profile(&config, &profile).unwrap();

    run_to_completion(&mut solver);

    for (u, x) in solver.temperature().iter().zip(solver.positions().iter()) {
        assert!((u - 100.0 * x).abs() < 1e-9, "u({}) = {}", x, u);
    }
}

#[test]
fn test_insulated_origin_keeps_heat() {
    // same bar, once with both ends cold, once insulated at x = 0
    let base = SimulationConfig::new(SimType::OneD, unit_material(), 1.0, 0.2, 0.0, 1.0)
        .with_grid_points(21)
        .with_time_steps(40);

    let mut dirichlet = ImplicitSolver1D::new(&base).unwrap();
    let mut insulated =
        ImplicitSolver1D::new(&base.clone().with_boundary(BoundaryPolicy::InsulatedOrigin)).unwrap();
    run_to_completion(&mut dirichlet);
    run_to_completion(&mut insulated);

    assert_eq!(dirichlet.temperature()[0], 0.0);
    assert!(insulated.temperature()[0] > 0.0);
    assert!(insulated.field().mean() > dirichlet.field().mean());
    assert_eq!(insulated.temperature()[20], 0.0);
}

#[test]
fn test_band_source_heats_the_bands() {
    let config = SimulationConfig::new(SimType::OneD, Material::glass(), 1.0, 16.0, 286.15, 0.0)
        .with_source(SourceTerm::Bands { amplitude: 80.0 })
        .with_grid_points(101);
    let mut solver = ImplicitSolver1D::new(&config).unwrap();

    run_to_completion(&mut solver);

    let u = solver.temperature();
    // first band (x = 0.15) is hotter than the second (x = 0.55), both above the gap
    assert!(u[15] > u[55]);
    assert!(u[55] > u[35]);
    assert!(u[35] >= 286.15);
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let base = SimulationConfig::new(SimType::OneD, unit_material(), 1.0, 1.0, 0.0, 0.0).with_grid_points(11);

    let invalid = [
        SimulationConfig { length: -1.0, ..base.clone() },
        SimulationConfig { tmax: 0.0, ..base.clone() },
        SimulationConfig { initial_temperature: f64::INFINITY, ..base.clone() },
        base.clone().with_grid_points(2),
        base.clone().with_time_steps(0),
        base.clone().with_source(SourceTerm::Patches { amplitude: 3.0 }),
    ];

    for config in invalid {
        match ImplicitSolver1D::new(&config) {
            Err(HeatError::InvalidParameter { .. }) => {}
            other => panic!("expected InvalidParameter, got {:?}", other.map(|s| s.name())),
        }
    }

    assert!(Material::new("Bad", 1.0, 0.0, 1.0).is_err());
}

#[test]
fn test_reset_restores_initial_state() {
    let config = SimulationConfig::new(SimType::OneD, Material::copper(), 0.5, 30.0, 300.0, 2.0)
        .with_grid_points(51)
        .with_time_steps(30);
    let mut solver = ImplicitSolver1D::new(&config).unwrap();
    let initial = solver.snapshot();

    run_to_completion(&mut solver);
    assert_ne!(solver.snapshot(), initial);

    solver.reset();
    assert_eq!(solver.snapshot(), initial);
    assert_eq!(solver.status(), SolverStatus::Initialized);

    // and the replay is identical
    let replay_steps = run_to_completion(&mut solver);
    assert_eq!(replay_steps, 30);
}
