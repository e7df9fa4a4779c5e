//! Common utilities for integration tests

pub mod fixtures;
pub mod test_helpers;

// Re-export commonly used items
pub use fixtures::{base_setup, write_setup};
pub use test_helpers::{
    assert_within_unit_interval,
    create_architecture,
    create_grid,
    escaping_sodium,
    relative_error,
    sodium_lines,
};
