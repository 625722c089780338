//! Common utilities for integration tests

#![allow(dead_code)]

pub mod fixtures;
pub mod test_helpers;

// Re-export commonly used items
pub use fixtures::{hot_spot, sine_mode_line, sine_mode_plate, unit_material};
pub use test_helpers::{
    assert_edges_exact,
    assert_fields_close,
    relative_error,
    run_to_completion,
    semi_discrete_decay_rate,
};
